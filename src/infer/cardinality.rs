//! Relationship multiplicity.

use crate::ast::{Cardinality, ColumnRef};
use crate::registry::Catalog;

/// Classify an edge from `from` to `to`.
///
/// ONE_TO_ONE when the source column alone is unique (or the primary key) and
/// the target column is the target's primary key; MANY_TO_ONE otherwise.
/// ONE_TO_MANY is the reading of a MANY_TO_ONE edge from the other end and is
/// never produced here.
pub fn resolve_cardinality(catalog: &Catalog, from: &ColumnRef, to: &ColumnRef) -> Cardinality {
    let from_is_key = catalog
        .get(&from.table)
        .is_some_and(|meta| meta.is_single_column_key(&from.column));
    let to_is_pk = catalog
        .get(&to.table)
        .is_some_and(|meta| meta.is_primary_key_column(&to.column));

    if from_is_key && to_is_pk {
        Cardinality::OneToOne
    } else {
        Cardinality::ManyToOne
    }
}
