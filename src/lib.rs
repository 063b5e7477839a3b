//! Infer an entity-relationship schema from SQL DDL.
//!
//! ```
//! let outcome = sqlerd::parse(
//!     "CREATE TABLE users (id SERIAL PRIMARY KEY);
//!      CREATE TABLE posts (id SERIAL PRIMARY KEY, user_id INT REFERENCES users(id));",
//! );
//! assert_eq!(outcome.schema.tables.len(), 2);
//! assert_eq!(outcome.schema.relationships.len(), 1);
//! ```

pub mod ast;
pub mod config;
pub mod infer;
pub mod registry;
pub mod report;
pub mod sql;

use wasm_bindgen::prelude::*;

pub use ast::{Cardinality, ColumnRef, DatabaseSchema, Relationship, Table};
pub use config::{ConfigError, InferenceConfig, InferenceOptions, ManyToManyMode, NameVariant};
pub use infer::{Diagnostic, ParseOutcome, SchemaInferrer, parse, parse_with};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Infer a schema from SQL text and return `{ schema, diagnostics }`.
///
/// `options` may be `undefined` or an object with any of `manyToMany`
/// (`"single"` or `"directional"`), `suffixes`, `replaceSuffixes` (`"y:ies"`)
/// and `conventions` (boolean).
#[wasm_bindgen(js_name = "inferSchema")]
pub fn infer_schema(sql: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        InferenceOptions::default()
    } else {
        let json = String::from(js_sys::JSON::stringify(&options)?);
        serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let config = options
        .into_config()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let outcome = parse_with(sql, &config);
    let json = serde_json::to_string(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
