//! The three relationship passes: explicit foreign keys, junctions, naming conventions.

use std::collections::HashSet;

use tracing::debug;

use super::cardinality::resolve_cardinality;
use crate::ast::{Cardinality, ColumnRef, Relationship, RelationshipSource};
use crate::config::{InferenceConfig, ManyToManyMode};
use crate::registry::Catalog;
use crate::sql::types_compatible;

/// One relationship per foreign-key column pair on every non-junction table.
pub fn direct_pass(catalog: &Catalog, junctions: &HashSet<String>, out: &mut Vec<Relationship>) {
    for meta in catalog.iter() {
        if junctions.contains(&meta.name().to_lowercase()) {
            continue;
        }
        for fk in meta.foreign_keys() {
            let Some(target) = fk.referenced_table.as_deref() else {
                continue;
            };
            for (i, column) in fk.columns.iter().enumerate() {
                let from = ColumnRef::new(meta.name(), column.as_str());
                let to = ColumnRef::new(target, fk.referenced_column_for(i));
                let cardinality = resolve_cardinality(catalog, &from, &to);
                out.push(Relationship {
                    from,
                    to,
                    cardinality,
                    junction_table: None,
                    source: RelationshipSource::Explicit,
                });
            }
        }
    }
}

/// One MANY_TO_MANY link between the two tables each junction connects.
pub fn junction_pass(
    catalog: &Catalog,
    junctions: &HashSet<String>,
    mode: ManyToManyMode,
    out: &mut Vec<Relationship>,
) {
    for meta in catalog.iter() {
        if !junctions.contains(&meta.name().to_lowercase()) {
            continue;
        }
        let ends: Vec<ColumnRef> = meta
            .foreign_keys()
            .filter_map(|fk| {
                let table = fk.referenced_table.as_deref()?;
                Some(ColumnRef::new(table, fk.referenced_column_for(0)))
            })
            .collect();
        let [left, right] = ends.as_slice() else {
            continue;
        };

        let link = |from: &ColumnRef, to: &ColumnRef| Relationship {
            from: from.clone(),
            to: to.clone(),
            cardinality: Cardinality::ManyToMany,
            junction_table: Some(meta.name().to_string()),
            source: RelationshipSource::Junction,
        };
        out.push(link(left, right));
        if mode == ManyToManyMode::Directional {
            out.push(link(right, left));
        }
    }
}

/// Infer links for `<stem>_id` columns that declare no foreign key.
///
/// Every candidate table produced by the configured name variants that exists,
/// has an `id` column and a compatible type yields a relationship. Tuples
/// already emitted by earlier passes are skipped.
///
/// Cost grows with tables x columns x variants; fine for schemas of tens of
/// tables.
pub fn convention_pass(catalog: &Catalog, config: &InferenceConfig, out: &mut Vec<Relationship>) {
    let mut seen: HashSet<_> = out.iter().map(Relationship::key).collect();

    for meta in catalog.iter() {
        for column in &meta.table.columns {
            if column.foreign_key.is_some() {
                continue;
            }
            let Some(stem) = id_stem(&column.name) else {
                continue;
            };

            for candidate in config.candidate_tables(stem) {
                let Some(target) = catalog.get(&candidate) else {
                    continue;
                };
                let Some(id) = target.table.column("id") else {
                    continue;
                };
                if !types_compatible(&column.data_type, &id.data_type) {
                    debug!(
                        "{}.{} -> {}.{}: incompatible types {} / {}",
                        meta.name(),
                        column.name,
                        target.name(),
                        id.name,
                        column.data_type,
                        id.data_type
                    );
                    continue;
                }

                let from = ColumnRef::new(meta.name(), column.name.as_str());
                let to = ColumnRef::new(target.name(), id.name.as_str());
                let relationship = Relationship {
                    cardinality: resolve_cardinality(catalog, &from, &to),
                    from,
                    to,
                    junction_table: None,
                    source: RelationshipSource::Convention,
                };
                if seen.insert(relationship.key()) {
                    out.push(relationship);
                }
            }
        }
    }
}

/// `categoria_id` -> `categoria`. Case-insensitive on the suffix.
fn id_stem(column: &str) -> Option<&str> {
    let split = column.len().checked_sub(3)?;
    if !column.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = column.split_at(split);
    (suffix.eq_ignore_ascii_case("_id") && !stem.is_empty()).then_some(stem)
}
