//! Deduplication and deterministic ordering of relationships.

use std::collections::HashSet;

use crate::ast::Relationship;

/// Keep the first relationship per (from table, from column, to table, to
/// column), then sort by cardinality rank and `"table.column"` of the source.
/// The sort is stable, so ties keep pass order.
pub fn dedup_and_sort(relationships: Vec<Relationship>) -> Vec<Relationship> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Relationship> = relationships
        .into_iter()
        .filter(|r| seen.insert(r.key()))
        .collect();

    unique.sort_by_cached_key(|r| (r.cardinality.rank(), r.from.qualified()));
    unique
}
