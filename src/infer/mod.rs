//! Relationship inference over parsed DDL.

mod cardinality;
mod engine;
mod junction;
mod ordering;
mod passes;

pub use cardinality::resolve_cardinality;
pub use engine::{Diagnostic, ParseOutcome, SchemaInferrer, parse, parse_with};
pub use junction::{detect_junctions, is_junction};
pub use ordering::dedup_and_sort;
pub use passes::{convention_pass, direct_pass, junction_pass};
