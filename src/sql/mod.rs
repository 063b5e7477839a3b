//! SQL text to per-statement DDL.
//!
//! Recognition is heuristic and sits behind [`StatementRecognizer`], so a
//! grammar-based backend can replace [`HeuristicRecognizer`] without touching
//! the data model or the inference passes.

mod lexer;
mod parser;
mod splitter;
mod types;

pub use lexer::{Lexer, Spanned, Token};
pub use parser::{AlterAction, ColumnDef, DdlStatement, HeuristicRecognizer, SqlParseError};
pub use splitter::{Statement, split_statements};
pub use types::{TypeFamily, normalize_type, type_family, types_compatible};

/// Turns one statement's text into its DDL meaning.
pub trait StatementRecognizer {
    fn recognize(&self, statement: &str) -> Result<DdlStatement, SqlParseError>;
}
