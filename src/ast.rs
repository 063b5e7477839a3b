use serde::Serialize;

/// The inferred schema handed to renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DatabaseSchema {
    /// Tables in first-declared order.
    pub tables: Vec<Table>,
    /// Deduplicated relationships, see `infer::ordering`.
    pub relationships: Vec<Relationship>,
}

impl DatabaseSchema {
    /// Look up a table by name, ignoring case.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    /// Declared type literal, kept as written (`VARCHAR(100)`).
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub foreign_key: Option<ColumnRef>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary_key: false,
            foreign_key: None,
        }
    }
}

/// A `table.column` pair. Used for foreign-key targets and relationship endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// `"table.column"`, the ordering key for relationships.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    pub referenced_table: Option<String>,
    pub referenced_columns: Vec<String>,
    pub name: Option<String>,
}

impl Constraint {
    pub fn primary_key(columns: Vec<String>) -> Self {
        Self::plain(ConstraintKind::PrimaryKey, columns)
    }

    pub fn unique(columns: Vec<String>) -> Self {
        Self::plain(ConstraintKind::Unique, columns)
    }

    pub fn check(columns: Vec<String>) -> Self {
        Self::plain(ConstraintKind::Check, columns)
    }

    pub fn foreign_key(
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
    ) -> Self {
        Self {
            kind: ConstraintKind::ForeignKey,
            columns,
            referenced_table: Some(referenced_table.into()),
            referenced_columns,
            name: None,
        }
    }

    fn plain(kind: ConstraintKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            referenced_table: None,
            referenced_columns: Vec::new(),
            name: None,
        }
    }

    pub fn named(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(column))
    }

    /// Referenced column paired with local column `i`. Falls back to the
    /// first referenced column on a count mismatch, then to `id`.
    pub fn referenced_column_for(&self, i: usize) -> &str {
        let paired = if self.referenced_columns.len() == self.columns.len() {
            self.referenced_columns.get(i)
        } else {
            self.referenced_columns.first()
        };
        paired.map(String::as_str).unwrap_or("id")
    }
}

/// Declared index column list. Recorded, never required by inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Index {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Output ordering priority.
    pub fn rank(self) -> u8 {
        match self {
            Self::OneToOne => 0,
            Self::OneToMany => 1,
            Self::ManyToOne => 2,
            Self::ManyToMany => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToOne => "N:1",
            Self::ManyToMany => "N:M",
        }
    }
}

/// Which pass produced a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipSource {
    Explicit,
    Junction,
    Convention,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from: ColumnRef,
    pub to: ColumnRef,
    pub cardinality: Cardinality,
    pub junction_table: Option<String>,
    pub source: RelationshipSource,
}

impl Relationship {
    /// Identity used for deduplication. Case-insensitive on names.
    pub fn key(&self) -> (String, String, String, String) {
        (
            self.from.table.to_lowercase(),
            self.from.column.to_lowercase(),
            self.to.table.to_lowercase(),
            self.to.column.to_lowercase(),
        )
    }
}
