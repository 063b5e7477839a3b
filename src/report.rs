//! Plain-text summary of an inferred schema, for terminals.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::ast::{Column, Table};
use crate::infer::ParseOutcome;

/// Displays tables, relationships and diagnostics as aligned columns.
/// Widths are measured in terminal cells, so wide identifiers line up.
pub struct Summary<'a> {
    outcome: &'a ParseOutcome,
}

impl<'a> Summary<'a> {
    pub fn new(outcome: &'a ParseOutcome) -> Self {
        Self { outcome }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = &self.outcome.schema;

        for table in &schema.tables {
            write_table(f, table)?;
        }

        if !schema.relationships.is_empty() {
            writeln!(f)?;
            writeln!(f, "Relationships")?;
            let rows: Vec<[String; 4]> = schema
                .relationships
                .iter()
                .map(|r| {
                    [
                        r.from.qualified(),
                        r.cardinality.as_str().to_string(),
                        r.to.qualified(),
                        r.junction_table
                            .as_ref()
                            .map(|j| format!("(via {j})"))
                            .unwrap_or_default(),
                    ]
                })
                .collect();
            write_rows(f, &rows)?;
        }

        if !self.outcome.diagnostics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Diagnostics")?;
            for d in &self.outcome.diagnostics {
                writeln!(f, "  line {}: {}", d.line, d.error)?;
            }
        }
        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &Table) -> fmt::Result {
    writeln!(f, "{}", table.name)?;
    let rows: Vec<[String; 4]> = table.columns.iter().map(column_row).collect();
    write_rows(f, &rows)
}

fn column_row(column: &Column) -> [String; 4] {
    let mut flags = Vec::new();
    if column.primary_key {
        flags.push("PK");
    }
    if !column.nullable {
        flags.push("NOT NULL");
    }
    [
        column.name.clone(),
        column.data_type.clone(),
        flags.join(" "),
        column
            .foreign_key
            .as_ref()
            .map(|fk| format!("FK -> {}", fk.qualified()))
            .unwrap_or_default(),
    ]
}

fn write_rows<const N: usize>(f: &mut fmt::Formatter<'_>, rows: &[[String; N]]) -> fmt::Result {
    let mut widths = [0usize; N];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    for row in rows {
        let mut line = String::from(" ");
        for (cell, width) in row.iter().zip(widths) {
            if width == 0 {
                continue;
            }
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(width - cell.width()));
            line.push(' ');
        }
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}
