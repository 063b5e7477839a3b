//! Heuristic recognizer for CREATE TABLE, ALTER TABLE and CREATE INDEX.

use super::StatementRecognizer;
use super::lexer::{Lexer, Spanned, Token};
use crate::ast::{Column, Constraint, Index};
use crate::registry::TableMetadata;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlParseError {
    #[error("missing table name")]
    MissingTableName,
    #[error("table `{0}` has no parenthesized body")]
    MissingBody(String),
    #[error("unmatched parenthesis")]
    UnmatchedParen,
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken {
        expected: &'static str,
        found: Option<Token>,
    },
    #[error("table `{0}` is already defined")]
    DuplicateTable(String),
    #[error("column `{column}` is already defined in `{table}`")]
    DuplicateColumn { table: String, column: String },
    #[error("unknown table `{0}`")]
    UnknownTable(String),
}

/// What a single statement contributes to the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlStatement {
    CreateTable {
        metadata: TableMetadata,
        /// Definitions inside the body that were skipped.
        warnings: Vec<SqlParseError>,
    },
    AlterTable {
        table: String,
        actions: Vec<AlterAction>,
        /// `ADD` clauses that were skipped.
        warnings: Vec<SqlParseError>,
    },
    CreateIndex {
        table: String,
        index: Index,
    },
    /// Anything else: DML, views, grants...
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterAction {
    AddConstraint(Constraint),
    AddColumn(ColumnDef),
    AddIndex(Index),
}

/// A column plus the constraints declared inline with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub column: Column,
    pub constraints: Vec<Constraint>,
}

/// Token-driven recognizer; tolerant of dialect noise it does not understand.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRecognizer;

impl StatementRecognizer for HeuristicRecognizer {
    fn recognize(&self, statement: &str) -> Result<DdlStatement, SqlParseError> {
        let tokens = Lexer::new(statement).tokenize();
        let mut cursor = Cursor::new(statement, &tokens);
        match cursor.current() {
            Some(Token::Create) => cursor.create(),
            Some(Token::Alter) => cursor.alter_table(),
            _ => Ok(DdlStatement::Other),
        }
    }
}

enum Definition {
    Column(ColumnDef),
    Constraint(Constraint),
    Index(Index),
}

struct Cursor<'a> {
    src: &'a str,
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, tokens: &'a [Spanned]) -> Self {
        Self {
            src,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_next(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1).map(|s| &s.token)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at(&self, token: &Token) -> bool {
        self.current() == Some(token)
    }

    fn at_word(&self, word: &str) -> bool {
        matches!(self.current(), Some(Token::Ident(w)) if w.eq_ignore_ascii_case(word))
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<(), SqlParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> SqlParseError {
        SqlParseError::UnexpectedToken {
            expected,
            found: self.current().cloned(),
        }
    }

    fn ident(&mut self) -> Option<String> {
        match self.current() {
            Some(Token::Ident(name)) => {
                self.advance();
                Some(name.clone())
            }
            _ => None,
        }
    }

    /// `name` or `schema.name`; the last part wins.
    fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.ident()?;
        while self.at(&Token::Dot) {
            self.advance();
            match self.ident() {
                Some(part) => name = part,
                None => break,
            }
        }
        Some(name)
    }

    fn skip_if_not_exists(&mut self) {
        if self.eat(&Token::If) {
            self.eat(&Token::Not);
            self.eat(&Token::Exists);
        }
    }

    fn rest(&self) -> &'a [Spanned] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    /// Index of the `)` closing the group that opens at the current token.
    fn group_end(&self) -> Result<usize, SqlParseError> {
        if !self.at(&Token::LParen) {
            return Err(self.unexpected("`(`"));
        }
        let mut depth = 0usize;
        for (i, spanned) in self.tokens.iter().enumerate().skip(self.pos) {
            match spanned.token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        Err(SqlParseError::UnmatchedParen)
    }

    fn skip_group(&mut self) -> Result<(), SqlParseError> {
        self.pos = self.group_end()? + 1;
        Ok(())
    }

    /// `(a, b, ...)`; each element contributes its first identifier.
    fn column_list(&mut self) -> Result<Vec<String>, SqlParseError> {
        let end = self.group_end()?;
        let inner = &self.tokens[self.pos + 1..end];
        self.pos = end + 1;
        Ok(split_top_level(inner)
            .into_iter()
            .filter_map(|item| {
                item.iter().find_map(|s| match &s.token {
                    Token::Ident(name) => Some(name.clone()),
                    _ => None,
                })
            })
            .collect())
    }

    fn create(&mut self) -> Result<DdlStatement, SqlParseError> {
        self.advance(); // CREATE
        while self.current().is_some_and(is_table_modifier) {
            self.advance();
        }
        match self.current() {
            Some(Token::Table) => self.create_table(),
            Some(Token::Index) => self.create_index(false),
            Some(Token::Unique) if self.peek_next() == Some(&Token::Index) => {
                self.advance();
                self.create_index(true)
            }
            // Views, sequences, functions, types...
            _ => Ok(DdlStatement::Other),
        }
    }

    fn create_table(&mut self) -> Result<DdlStatement, SqlParseError> {
        self.advance(); // TABLE
        self.skip_if_not_exists();

        let name = self
            .qualified_name()
            .ok_or(SqlParseError::MissingTableName)?;
        if !self.at(&Token::LParen) {
            return Err(SqlParseError::MissingBody(name));
        }
        let end = self.group_end()?;
        let body = &self.tokens[self.pos + 1..end];
        // Table options after the body (ENGINE=..., WITH ...) are ignored

        let mut metadata = TableMetadata::new(name);
        let mut constraints = Vec::new();
        let mut warnings = Vec::new();

        for item in split_top_level(body) {
            match Cursor::new(self.src, item).definition() {
                Ok(Definition::Column(def)) => {
                    let column = def.column.name.clone();
                    if metadata.push_column(def.column) {
                        constraints.extend(def.constraints);
                    } else {
                        warnings.push(SqlParseError::DuplicateColumn {
                            table: metadata.name().to_string(),
                            column,
                        });
                    }
                }
                Ok(Definition::Constraint(constraint)) => constraints.push(constraint),
                Ok(Definition::Index(index)) => metadata.indexes.push(index),
                Err(e) => warnings.push(e),
            }
        }

        // Applied once every column exists
        for constraint in constraints {
            metadata.add_constraint(constraint);
        }

        Ok(DdlStatement::CreateTable { metadata, warnings })
    }

    fn definition(&mut self) -> Result<Definition, SqlParseError> {
        match self.current() {
            Some(Token::Constraint) => {
                self.advance();
                let name = self.ident();
                Ok(Definition::Constraint(self.table_constraint(name)?))
            }
            Some(Token::Primary | Token::Foreign | Token::Unique | Token::Check) => {
                Ok(Definition::Constraint(self.table_constraint(None)?))
            }
            Some(Token::Key | Token::Index) if self.index_line_at(1) => {
                self.advance();
                Ok(Definition::Index(self.index_definition()?))
            }
            Some(Token::Ident(word))
                if is_index_flavor(word)
                    && matches!(self.peek_next(), Some(Token::Key | Token::Index))
                    && self.index_line_at(2) =>
            {
                self.advance();
                self.advance();
                Ok(Definition::Index(self.index_definition()?))
            }
            Some(token) if token.is_column_name() => {
                Ok(Definition::Column(self.column_definition()?))
            }
            _ => Err(self.unexpected("column or constraint definition")),
        }
    }

    /// Whether the tokens from `offset` read `[name] (column, ...)`.
    ///
    /// Tells `KEY idx (author_id)` apart from a column named `key`, whose
    /// type suffix holds numbers or strings, as in `key VARCHAR(50)`.
    fn index_line_at(&self, offset: usize) -> bool {
        let token_at = |i: usize| self.tokens.get(self.pos + i).map(|s| &s.token);
        let open = match token_at(offset) {
            Some(Token::LParen) => offset,
            Some(Token::Ident(_)) if token_at(offset + 1) == Some(&Token::LParen) => offset + 1,
            _ => return false,
        };
        matches!(token_at(open + 1), Some(Token::Ident(_)))
    }

    /// Column name; keywords such as `key` or `index` are allowed.
    fn column_name(&mut self) -> Option<String> {
        let spanned = self.tokens.get(self.pos)?;
        let name = match &spanned.token {
            Token::Ident(name) => name.clone(),
            token if token.is_column_name() => {
                self.src[spanned.start..spanned.end].to_string()
            }
            _ => return None,
        };
        self.advance();
        Some(name)
    }

    /// MySQL `KEY name (cols)` inside a table body.
    fn index_definition(&mut self) -> Result<Index, SqlParseError> {
        let name = self.ident();
        let columns = self.column_list()?;
        Ok(Index {
            name,
            columns,
            unique: false,
        })
    }

    fn table_constraint(&mut self, name: Option<String>) -> Result<Constraint, SqlParseError> {
        let constraint = match self.current() {
            Some(Token::Primary) => {
                self.advance();
                self.expect(&Token::Key, "KEY")?;
                Constraint::primary_key(self.column_list()?)
            }
            Some(Token::Foreign) => {
                self.advance();
                self.expect(&Token::Key, "KEY")?;
                // MySQL allows an index name here
                self.ident();
                let columns = self.column_list()?;
                self.expect(&Token::References, "REFERENCES")?;
                let (table, referenced) = self.reference()?;
                Constraint::foreign_key(columns, table, referenced)
            }
            Some(Token::Unique) => {
                self.advance();
                if !self.eat(&Token::Key) {
                    self.eat(&Token::Index);
                }
                self.ident();
                Constraint::unique(self.column_list()?)
            }
            Some(Token::Check) => Constraint::check(Vec::new()),
            _ => return Err(self.unexpected("PRIMARY KEY, FOREIGN KEY, UNIQUE or CHECK")),
        };
        Ok(constraint.named(name))
    }

    /// `table [(col, ...)]` after REFERENCES.
    fn reference(&mut self) -> Result<(String, Vec<String>), SqlParseError> {
        let table = self
            .qualified_name()
            .ok_or_else(|| self.unexpected("referenced table"))?;
        let columns = if self.at(&Token::LParen) {
            self.column_list()?
        } else {
            Vec::new()
        };
        Ok((table, columns))
    }

    fn column_definition(&mut self) -> Result<ColumnDef, SqlParseError> {
        let name = self
            .column_name()
            .ok_or_else(|| self.unexpected("column name"))?;
        let data_type = self.type_literal()?;

        let mut column = Column::new(name.clone(), data_type);
        let mut constraints = Vec::new();
        let mut pending_name = None;

        while let Some(token) = self.current() {
            match token {
                Token::Not => {
                    self.advance();
                    if self.eat(&Token::Null) {
                        column.nullable = false;
                    }
                }
                Token::Primary => {
                    self.advance();
                    self.eat(&Token::Key);
                    constraints.push(
                        Constraint::primary_key(vec![name.clone()]).named(pending_name.take()),
                    );
                }
                Token::Unique => {
                    self.advance();
                    self.eat(&Token::Key);
                    constraints
                        .push(Constraint::unique(vec![name.clone()]).named(pending_name.take()));
                }
                Token::References => {
                    self.advance();
                    let (table, referenced) = self.reference()?;
                    constraints.push(
                        Constraint::foreign_key(vec![name.clone()], table, referenced)
                            .named(pending_name.take()),
                    );
                }
                Token::Check => {
                    self.advance();
                    if self.at(&Token::LParen) {
                        self.skip_group()?;
                    }
                    constraints
                        .push(Constraint::check(vec![name.clone()]).named(pending_name.take()));
                }
                Token::Constraint => {
                    self.advance();
                    pending_name = self.ident();
                }
                // DEFAULT (expr), GENERATED ... AS (expr)
                Token::LParen => self.skip_group()?,
                _ => self.advance(),
            }
        }

        Ok(ColumnDef {
            column,
            constraints,
        })
    }

    /// The type word plus an optional parenthesized suffix, sliced verbatim.
    fn type_literal(&mut self) -> Result<String, SqlParseError> {
        let Some(Spanned {
            token: Token::Ident(_),
            start,
            end,
        }) = self.tokens.get(self.pos)
        else {
            return Ok(String::new());
        };
        let (start, mut end) = (*start, *end);
        self.advance();

        if self.at(&Token::LParen) {
            let close = self.group_end()?;
            end = self.tokens[close].end;
            self.pos = close + 1;
        }
        Ok(self.src[start..end].to_string())
    }

    fn create_index(&mut self, unique: bool) -> Result<DdlStatement, SqlParseError> {
        self.advance(); // INDEX
        if self.at_word("CONCURRENTLY") {
            self.advance();
        }
        self.skip_if_not_exists();

        let name = if self.at(&Token::On) {
            None
        } else {
            self.qualified_name()
        };
        self.expect(&Token::On, "ON")?;
        self.eat(&Token::Only);
        let table = self
            .qualified_name()
            .ok_or(SqlParseError::MissingTableName)?;
        if self.eat(&Token::Using) {
            self.ident();
        }
        let columns = self.column_list()?;

        Ok(DdlStatement::CreateIndex {
            table,
            index: Index {
                name,
                columns,
                unique,
            },
        })
    }

    fn alter_table(&mut self) -> Result<DdlStatement, SqlParseError> {
        self.advance(); // ALTER
        if !self.eat(&Token::Table) {
            return Ok(DdlStatement::Other);
        }
        if self.eat(&Token::If) {
            self.eat(&Token::Exists);
        }
        self.eat(&Token::Only);

        let table = self
            .qualified_name()
            .ok_or(SqlParseError::MissingTableName)?;

        let mut actions = Vec::new();
        let mut warnings = Vec::new();
        for item in split_top_level(self.rest()) {
            let mut action = Cursor::new(self.src, item);
            // DROP, ALTER COLUMN, OWNER TO... carry nothing for us
            if action.eat(&Token::Add) {
                match action.alter_addition() {
                    Ok(added) => actions.push(added),
                    Err(e) => warnings.push(e),
                }
            }
        }

        if actions.is_empty() && warnings.is_empty() {
            Ok(DdlStatement::Other)
        } else {
            Ok(DdlStatement::AlterTable {
                table,
                actions,
                warnings,
            })
        }
    }

    fn alter_addition(&mut self) -> Result<AlterAction, SqlParseError> {
        match self.current() {
            Some(Token::Constraint) => {
                self.advance();
                let name = self.ident();
                Ok(AlterAction::AddConstraint(self.table_constraint(name)?))
            }
            Some(Token::Primary | Token::Foreign | Token::Unique | Token::Check) => {
                Ok(AlterAction::AddConstraint(self.table_constraint(None)?))
            }
            Some(Token::Key | Token::Index) if self.index_line_at(1) => {
                self.advance();
                Ok(AlterAction::AddIndex(self.index_definition()?))
            }
            Some(Token::Ident(word))
                if is_index_flavor(word)
                    && matches!(self.peek_next(), Some(Token::Key | Token::Index))
                    && self.index_line_at(2) =>
            {
                self.advance();
                self.advance();
                Ok(AlterAction::AddIndex(self.index_definition()?))
            }
            Some(Token::Column) => {
                self.advance();
                self.skip_if_not_exists();
                Ok(AlterAction::AddColumn(self.column_definition()?))
            }
            Some(token) if token.is_column_name() => {
                Ok(AlterAction::AddColumn(self.column_definition()?))
            }
            _ => Err(self.unexpected("constraint, index or column after ADD")),
        }
    }
}

/// Split on commas that sit outside any parentheses.
fn split_top_level(tokens: &[Spanned]) -> Vec<&[Spanned]> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                items.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&tokens[start..]);
    items.retain(|item| !item.is_empty());
    items
}

fn is_table_modifier(token: &Token) -> bool {
    matches!(token, Token::Ident(word)
        if ["TEMP", "TEMPORARY", "UNLOGGED", "GLOBAL", "LOCAL"]
            .iter()
            .any(|m| word.eq_ignore_ascii_case(m)))
}

fn is_index_flavor(word: &str) -> bool {
    word.eq_ignore_ascii_case("FULLTEXT") || word.eq_ignore_ascii_case("SPATIAL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, ConstraintKind};

    fn recognize(sql: &str) -> DdlStatement {
        HeuristicRecognizer.recognize(sql).unwrap()
    }

    fn table(sql: &str) -> TableMetadata {
        match recognize(sql) {
            DdlStatement::CreateTable { metadata, warnings } => {
                assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
                metadata
            }
            other => panic!("expected CREATE TABLE, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_table() {
        let meta = table(
            "CREATE TABLE users (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(100) UNIQUE
            )",
        );

        assert_eq!(meta.name(), "users");
        let cols = &meta.table.columns;
        assert_eq!(cols.len(), 3);

        assert_eq!(cols[0].name, "id");
        assert_eq!(cols[0].data_type, "SERIAL");
        assert!(cols[0].primary_key);

        assert_eq!(cols[1].data_type, "VARCHAR(100)");
        assert!(!cols[1].nullable);
        assert!(cols[2].nullable);
        assert!(meta.is_single_column_key("email"));
    }

    #[test]
    fn test_parse_if_not_exists_and_schema() {
        let meta = table("CREATE TABLE IF NOT EXISTS public.\"Orders\" (id INT)");
        assert_eq!(meta.name(), "Orders");
    }

    #[test]
    fn test_temporary_table() {
        let meta = table("CREATE TEMPORARY TABLE scratch (id INT)");
        assert_eq!(meta.name(), "scratch");
    }

    #[test]
    fn test_type_kept_verbatim() {
        let meta = table("CREATE TABLE p (price DECIMAL(10, 2) NOT NULL, tag text)");
        assert_eq!(meta.table.columns[0].data_type, "DECIMAL(10, 2)");
        assert_eq!(meta.table.columns[1].data_type, "text");
    }

    #[test]
    fn test_table_level_primary_key() {
        let meta = table("CREATE TABLE t (a INT, b INT, c TEXT, PRIMARY KEY (a, b))");
        let pk = meta.primary_key().unwrap();
        assert_eq!(pk.columns, vec!["a", "b"]);
        assert!(meta.table.columns[0].primary_key);
        assert!(meta.table.columns[1].primary_key);
        assert!(!meta.table.columns[2].primary_key);
    }

    #[test]
    fn test_inline_references() {
        let meta = table(
            "CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT REFERENCES users(id) ON DELETE CASCADE,
                shop_id INT REFERENCES shops
            )",
        );

        assert_eq!(
            meta.table.columns[1].foreign_key,
            Some(ColumnRef::new("users", "id"))
        );
        assert_eq!(
            meta.table.columns[2].foreign_key,
            Some(ColumnRef::new("shops", "id"))
        );
        assert_eq!(meta.foreign_keys().count(), 2);
    }

    #[test]
    fn test_composite_foreign_key_positional() {
        let meta = table(
            "CREATE TABLE lines (
                order_id INT,
                order_rev INT,
                FOREIGN KEY (order_id, order_rev) REFERENCES orders (id, rev)
            )",
        );
        assert_eq!(
            meta.table.columns[0].foreign_key,
            Some(ColumnRef::new("orders", "id"))
        );
        assert_eq!(
            meta.table.columns[1].foreign_key,
            Some(ColumnRef::new("orders", "rev"))
        );
    }

    #[test]
    fn test_named_constraints() {
        let meta = table(
            "CREATE TABLE t (
                id INT CONSTRAINT t_pk PRIMARY KEY,
                code TEXT,
                parent INT,
                CONSTRAINT t_code_uq UNIQUE (code),
                CONSTRAINT t_parent_fk FOREIGN KEY (parent) REFERENCES t (id),
                CONSTRAINT t_code_chk CHECK (length(code) > 0)
            )",
        );

        let names: Vec<_> = meta
            .constraints
            .iter()
            .map(|c| (c.kind, c.name.as_deref()))
            .collect();
        assert!(names.contains(&(ConstraintKind::PrimaryKey, Some("t_pk"))));
        assert!(names.contains(&(ConstraintKind::Unique, Some("t_code_uq"))));
        assert!(names.contains(&(ConstraintKind::ForeignKey, Some("t_parent_fk"))));
        assert!(names.contains(&(ConstraintKind::Check, Some("t_code_chk"))));
    }

    #[test]
    fn test_not_null_inside_check_ignored() {
        let meta = table("CREATE TABLE t (a INT CHECK (a IS NOT NULL), b INT DEFAULT (1))");
        assert!(meta.table.columns[0].nullable);
        assert_eq!(meta.table.columns.len(), 2);
    }

    #[test]
    fn test_mysql_keys() {
        let meta = table(
            "CREATE TABLE `posts` (
                `id` int(11) NOT NULL AUTO_INCREMENT,
                `author_id` int(11) NOT NULL,
                `body` text,
                PRIMARY KEY (`id`),
                UNIQUE KEY `uq_author` (`author_id`),
                KEY `idx_author` (`author_id`),
                FULLTEXT KEY `ft_body` (`body`)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
        );

        assert_eq!(meta.table.columns.len(), 3);
        assert_eq!(meta.table.columns[0].data_type, "int(11)");
        assert!(meta.is_single_column_key("author_id"));
        assert_eq!(meta.indexes.len(), 2);
        assert_eq!(meta.indexes[0].name.as_deref(), Some("idx_author"));
    }

    #[test]
    fn test_keyword_column_names() {
        let meta = table(
            "CREATE TABLE settings (id INT PRIMARY KEY, key VARCHAR(50) NOT NULL, value TEXT)",
        );
        let names: Vec<_> = meta.table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "key", "value"]);
        assert_eq!(meta.table.columns[1].data_type, "VARCHAR(50)");
        assert!(!meta.table.columns[1].nullable);
        assert!(meta.indexes.is_empty());

        let meta = table("CREATE TABLE audit (id INT PRIMARY KEY, index INT, Key TEXT, note TEXT)");
        let names: Vec<_> = meta.table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "index", "Key", "note"]);
    }

    #[test]
    fn test_key_lines_still_indexes() {
        let meta = table(
            "CREATE TABLE t (
                a INT,
                b INT,
                KEY (a),
                INDEX idx_b (b),
                FULLTEXT INDEX ft (a)
            )",
        );
        assert_eq!(meta.table.columns.len(), 2);
        assert_eq!(meta.indexes.len(), 3);
        assert_eq!(meta.indexes[0].name, None);
        assert_eq!(meta.indexes[1].columns, vec!["b"]);
    }

    #[test]
    fn test_alter_table_mysql_export() {
        let stmt = recognize(
            "ALTER TABLE `profiles`
                ADD PRIMARY KEY (`id`),
                ADD UNIQUE KEY `u` (`user_id`),
                ADD KEY `idx` (`user_id`),
                ADD FULLTEXT KEY `ft` (`bio`)",
        );
        let DdlStatement::AlterTable {
            table,
            actions,
            warnings,
        } = stmt
        else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(table, "profiles");
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(actions.len(), 4);
        assert!(matches!(
            &actions[0],
            AlterAction::AddConstraint(c) if c.kind == ConstraintKind::PrimaryKey
        ));
        assert!(matches!(
            &actions[1],
            AlterAction::AddConstraint(c) if c.kind == ConstraintKind::Unique
        ));
        assert!(matches!(
            &actions[2],
            AlterAction::AddIndex(i) if i.name.as_deref() == Some("idx")
        ));
        assert!(matches!(&actions[3], AlterAction::AddIndex(_)));
    }

    #[test]
    fn test_alter_table_bad_clause_is_a_warning() {
        let stmt = recognize("ALTER TABLE t ADD PRIMARY KEY (id), ADD FOREIGN KEY, ADD key TEXT");
        let DdlStatement::AlterTable {
            actions, warnings, ..
        } = stmt
        else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[1], AlterAction::AddColumn(def) if def.column.name == "key"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_duplicate_column_warns() {
        match recognize("CREATE TABLE t (id INT, ID TEXT, x INT)") {
            DdlStatement::CreateTable { metadata, warnings } => {
                assert_eq!(metadata.table.columns.len(), 2);
                assert_eq!(
                    warnings,
                    vec![SqlParseError::DuplicateColumn {
                        table: "t".into(),
                        column: "ID".into()
                    }]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_broken_definitions_become_warnings() {
        match recognize("CREATE TABLE t (id INT, PRIMARY (id), name TEXT)") {
            DdlStatement::CreateTable { metadata, warnings } => {
                assert_eq!(metadata.table.columns.len(), 2);
                assert_eq!(warnings.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_paren() {
        let err = HeuristicRecognizer
            .recognize("CREATE TABLE t (id INT, name VARCHAR(10)")
            .unwrap_err();
        assert_eq!(err, SqlParseError::UnmatchedParen);
    }

    #[test]
    fn test_missing_body() {
        let err = HeuristicRecognizer
            .recognize("CREATE TABLE t AS SELECT * FROM u")
            .unwrap_err();
        assert_eq!(err, SqlParseError::MissingBody("t".into()));
    }

    #[test]
    fn test_missing_name() {
        let err = HeuristicRecognizer.recognize("CREATE TABLE (id INT)").unwrap_err();
        assert_eq!(err, SqlParseError::MissingTableName);
    }

    #[test]
    fn test_other_statements_ignored() {
        assert_eq!(recognize("INSERT INTO t VALUES (1)"), DdlStatement::Other);
        assert_eq!(recognize("CREATE VIEW v AS SELECT 1"), DdlStatement::Other);
        assert_eq!(recognize("ALTER TABLE t OWNER TO admin"), DdlStatement::Other);
        assert_eq!(recognize("DROP TABLE t"), DdlStatement::Other);
    }

    #[test]
    fn test_alter_table_add_constraint() {
        let stmt = recognize(
            "ALTER TABLE ONLY public.orders
                ADD CONSTRAINT orders_user_fk FOREIGN KEY (user_id) REFERENCES public.users(id)",
        );
        let DdlStatement::AlterTable { table, actions, .. } = stmt else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(table, "orders");
        assert_eq!(actions.len(), 1);
        let AlterAction::AddConstraint(fk) = &actions[0] else {
            panic!("expected constraint");
        };
        assert_eq!(fk.kind, ConstraintKind::ForeignKey);
        assert_eq!(fk.referenced_table.as_deref(), Some("users"));
        assert_eq!(fk.name.as_deref(), Some("orders_user_fk"));
    }

    #[test]
    fn test_alter_table_add_column() {
        let stmt = recognize(
            "ALTER TABLE t ADD COLUMN IF NOT EXISTS owner_id BIGINT NOT NULL, DROP COLUMN x",
        );
        let DdlStatement::AlterTable { actions, .. } = stmt else {
            panic!("expected ALTER TABLE");
        };
        let AlterAction::AddColumn(def) = &actions[0] else {
            panic!("expected column");
        };
        assert_eq!(def.column.name, "owner_id");
        assert_eq!(def.column.data_type, "BIGINT");
        assert!(!def.column.nullable);
    }

    #[test]
    fn test_create_index() {
        let stmt = recognize(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_email ON public.users USING btree (email, lower(name))",
        );
        assert_eq!(
            stmt,
            DdlStatement::CreateIndex {
                table: "users".into(),
                index: Index {
                    name: Some("idx_email".into()),
                    columns: vec!["email".into(), "lower".into()],
                    unique: true,
                },
            }
        );
    }

    #[test]
    fn test_split_top_level() {
        let tokens = Lexer::new("a INT, b DECIMAL(1, 2), c TEXT").tokenize();
        let items = split_top_level(&tokens);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].len(), 7);
    }
}
