//! Many-to-many junction table detection.

use std::collections::HashSet;

use crate::registry::{Catalog, TableMetadata};

/// Bookkeeping columns a junction may carry without losing its status.
const AUDIT_COLUMNS: &[&str] = &["created_at", "updated_at", "deleted_at"];

/// Non-key columns a junction may carry besides audit columns.
const MAX_PAYLOAD_COLUMNS: usize = 2;

/// Lower-cased names of every junction table in the catalog.
pub fn detect_junctions(catalog: &Catalog) -> HashSet<String> {
    catalog
        .iter()
        .filter(|meta| is_junction(meta))
        .map(|meta| meta.name().to_lowercase())
        .collect()
}

/// Exactly two foreign keys whose columns together form the primary key,
/// plus at most two payload columns.
pub fn is_junction(meta: &TableMetadata) -> bool {
    let foreign_keys: Vec<_> = meta.foreign_keys().collect();
    if foreign_keys.len() != 2 {
        return false;
    }
    let Some(pk) = meta.primary_key() else {
        return false;
    };

    let fk_columns: HashSet<String> = foreign_keys
        .iter()
        .flat_map(|fk| fk.columns.iter().map(|c| c.to_lowercase()))
        .collect();
    let pk_columns: HashSet<String> = pk.columns.iter().map(|c| c.to_lowercase()).collect();
    if fk_columns != pk_columns {
        return false;
    }

    let payload = meta
        .table
        .columns
        .iter()
        .map(|c| c.name.to_lowercase())
        .filter(|name| !fk_columns.contains(name) && !is_audit_column(name))
        .count();
    payload <= MAX_PAYLOAD_COLUMNS
}

fn is_audit_column(lower: &str) -> bool {
    AUDIT_COLUMNS.contains(&lower) || lower.contains("timestamp") || lower.contains("date_")
}
