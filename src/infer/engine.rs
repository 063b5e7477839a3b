//! Pure `parse(text) -> schema` entry point.

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use super::junction::detect_junctions;
use super::ordering::dedup_and_sort;
use super::passes::{convention_pass, direct_pass, junction_pass};
use crate::ast::{DatabaseSchema, Index};
use crate::config::InferenceConfig;
use crate::registry::Catalog;
use crate::sql::{
    AlterAction, DdlStatement, HeuristicRecognizer, SqlParseError, Statement, StatementRecognizer,
    split_statements,
};

/// A statement, or a definition inside one, that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Index of the statement in the script, from 0.
    pub statement: usize,
    pub line: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: SqlParseError,
}

impl Diagnostic {
    fn new(statement: &Statement, error: SqlParseError) -> Self {
        Self {
            statement: statement.index,
            line: statement.line,
            error,
        }
    }
}

fn serialize_display<S: Serializer>(error: &SqlParseError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Best-effort result: whatever could be inferred plus what was skipped.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParseOutcome {
    pub schema: DatabaseSchema,
    pub diagnostics: Vec<Diagnostic>,
}

/// Infer a schema with the default recognizer and options.
pub fn parse(sql: &str) -> ParseOutcome {
    SchemaInferrer::<HeuristicRecognizer>::default().infer(sql)
}

pub fn parse_with(sql: &str, config: &InferenceConfig) -> ParseOutcome {
    SchemaInferrer::new(HeuristicRecognizer, config.clone()).infer(sql)
}

/// Table-modifying statements, applied once every table exists.
enum Deferred {
    Alter {
        table: String,
        actions: Vec<AlterAction>,
    },
    Index {
        table: String,
        index: Index,
    },
}

/// Holds only configuration; every call to [`SchemaInferrer::infer`] builds
/// its own working state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer<R = HeuristicRecognizer> {
    recognizer: R,
    config: InferenceConfig,
}

impl<R: StatementRecognizer> SchemaInferrer<R> {
    pub fn new(recognizer: R, config: InferenceConfig) -> Self {
        Self { recognizer, config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn infer(&self, sql: &str) -> ParseOutcome {
        let mut catalog = Catalog::default();
        let mut diagnostics = Vec::new();
        let mut deferred = Vec::new();

        for statement in split_statements(sql) {
            match self.recognizer.recognize(&statement.text) {
                Ok(DdlStatement::CreateTable { metadata, warnings }) => {
                    debug!(
                        "line {}: table {} ({} columns)",
                        statement.line,
                        metadata.name(),
                        metadata.table.columns.len()
                    );
                    for warning in warnings {
                        warn!("line {}: skipped definition: {}", statement.line, warning);
                        diagnostics.push(Diagnostic::new(&statement, warning));
                    }
                    if let Err(e) = catalog.insert(metadata) {
                        warn!("line {}: {}", statement.line, e);
                        diagnostics.push(Diagnostic::new(&statement, e));
                    }
                }
                Ok(DdlStatement::AlterTable {
                    table,
                    actions,
                    warnings,
                }) => {
                    for warning in warnings {
                        warn!("line {}: skipped clause: {}", statement.line, warning);
                        diagnostics.push(Diagnostic::new(&statement, warning));
                    }
                    if !actions.is_empty() {
                        deferred.push((statement, Deferred::Alter { table, actions }));
                    }
                }
                Ok(DdlStatement::CreateIndex { table, index }) => {
                    deferred.push((statement, Deferred::Index { table, index }));
                }
                Ok(DdlStatement::Other) => {}
                Err(e) => {
                    warn!("line {}: skipped statement: {}", statement.line, e);
                    diagnostics.push(Diagnostic::new(&statement, e));
                }
            }
        }

        for (statement, change) in deferred {
            match apply(&mut catalog, change) {
                Ok(skipped) => {
                    for e in skipped {
                        warn!("line {}: skipped clause: {}", statement.line, e);
                        diagnostics.push(Diagnostic::new(&statement, e));
                    }
                }
                Err(e) => {
                    warn!("line {}: {}", statement.line, e);
                    diagnostics.push(Diagnostic::new(&statement, e));
                }
            }
        }

        let junctions = detect_junctions(&catalog);
        let mut relationships = Vec::new();
        direct_pass(&catalog, &junctions, &mut relationships);
        junction_pass(
            &catalog,
            &junctions,
            self.config.many_to_many,
            &mut relationships,
        );
        if self.config.infer_conventions {
            convention_pass(&catalog, &self.config, &mut relationships);
        }
        let relationships = dedup_and_sort(relationships);

        info!(
            "inferred {} tables, {} relationships ({} junctions, {} diagnostics)",
            catalog.len(),
            relationships.len(),
            junctions.len(),
            diagnostics.len()
        );

        ParseOutcome {
            schema: DatabaseSchema {
                tables: catalog.into_tables(),
                relationships,
            },
            diagnostics,
        }
    }
}

/// Applies `change`; fails only when its table is unknown. Actions that
/// cannot be applied are skipped and returned.
fn apply(catalog: &mut Catalog, change: Deferred) -> Result<Vec<SqlParseError>, SqlParseError> {
    let mut skipped = Vec::new();
    match change {
        Deferred::Alter { table, actions } => {
            let meta = catalog
                .get_mut(&table)
                .ok_or(SqlParseError::UnknownTable(table))?;
            for action in actions {
                match action {
                    AlterAction::AddConstraint(constraint) => meta.add_constraint(constraint),
                    AlterAction::AddIndex(index) => meta.indexes.push(index),
                    AlterAction::AddColumn(def) => {
                        let column = def.column.name.clone();
                        if !meta.push_column(def.column) {
                            skipped.push(SqlParseError::DuplicateColumn {
                                table: meta.name().to_string(),
                                column,
                            });
                            continue;
                        }
                        for constraint in def.constraints {
                            meta.add_constraint(constraint);
                        }
                    }
                }
            }
        }
        Deferred::Index { table, index } => {
            let meta = catalog
                .get_mut(&table)
                .ok_or(SqlParseError::UnknownTable(table))?;
            meta.indexes.push(index);
        }
    }
    Ok(skipped)
}
