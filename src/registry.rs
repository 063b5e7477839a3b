//! Per-table constraint registry.

use std::collections::HashMap;

use crate::ast::{Column, ColumnRef, Constraint, ConstraintKind, Index, Table};
use crate::sql::SqlParseError;

/// A table plus everything declared about it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub table: Table,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: Table::new(name),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Append a column. Returns false when the name is already taken.
    pub fn push_column(&mut self, column: Column) -> bool {
        if self.table.column(&column.name).is_some() {
            return false;
        }
        self.table.columns.push(column);
        true
    }

    /// Register a constraint and mirror it onto column flags.
    ///
    /// A second primary key merges into the first, so a table holds at most one.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        match constraint.kind {
            ConstraintKind::PrimaryKey => {
                for name in &constraint.columns {
                    if let Some(col) = self.table.column_mut(name) {
                        col.primary_key = true;
                    }
                }
                if let Some(existing) = self
                    .constraints
                    .iter_mut()
                    .find(|c| c.kind == ConstraintKind::PrimaryKey)
                {
                    for name in constraint.columns {
                        if !existing.covers(&name) {
                            existing.columns.push(name);
                        }
                    }
                    return;
                }
            }
            ConstraintKind::ForeignKey => {
                let target = constraint.referenced_table.clone().unwrap_or_default();
                for (i, name) in constraint.columns.iter().enumerate() {
                    if let Some(col) = self.table.column_mut(name) {
                        if col.foreign_key.is_none() {
                            col.foreign_key = Some(ColumnRef::new(
                                target.clone(),
                                constraint.referenced_column_for(i),
                            ));
                        }
                    }
                }
            }
            ConstraintKind::Unique | ConstraintKind::Check => {}
        }
        self.constraints.push(constraint);
    }

    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.kind == ConstraintKind::PrimaryKey)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &Constraint> {
        self.of_kind(ConstraintKind::ForeignKey)
    }

    pub fn uniques(&self) -> impl Iterator<Item = &Constraint> {
        self.of_kind(ConstraintKind::Unique)
    }

    fn of_kind(&self, kind: ConstraintKind) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    pub fn is_primary_key_column(&self, column: &str) -> bool {
        self.primary_key().is_some_and(|pk| pk.covers(column))
            || self.table.column(column).is_some_and(|c| c.primary_key)
    }

    /// True when `column` alone is a primary key or a unique key.
    pub fn is_single_column_key(&self, column: &str) -> bool {
        let single = |c: &Constraint| c.columns.len() == 1 && c.covers(column);
        self.primary_key().is_some_and(single) || self.uniques().any(single)
    }
}

/// Every table of one parse, in first-declared order, addressable by name
/// regardless of case.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: Vec<TableMetadata>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Add a table. The first definition of a name wins.
    pub fn insert(&mut self, metadata: TableMetadata) -> Result<(), SqlParseError> {
        let key = metadata.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(SqlParseError::DuplicateTable(metadata.table.name));
        }
        self.by_name.insert(key, self.tables.len());
        self.tables.push(metadata);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TableMetadata> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.tables[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TableMetadata> {
        let i = *self.by_name.get(&name.to_lowercase())?;
        self.tables.get_mut(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableMetadata> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn into_tables(self) -> Vec<Table> {
        self.tables.into_iter().map(|m| m.table).collect()
    }
}
