//! FILENAME: core/range-file/src/lib.rs
//! Range Assistant range file format
//!
//! A `.range` file is UTF-8 JSON exported by the range builder. Loading one is
//! read, parse, then validate against the bundled JSON schema. The document is
//! kept as a `serde_json::Value`: the shell only forwards it to the UI, so the
//! schema is the whole contract.

mod error;

pub use error::RangeFileError;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::Path;

// ============================================================================
// SCHEMA
// ============================================================================

/// File extension registered for range documents (without the dot).
pub const RANGE_EXTENSION: &str = "range";

/// The bundled schema source.
pub const RANGE_SCHEMA: &str = include_str!("../schema/range.schema.json");

/// Compiled once; a compile failure is stored so every load reports it instead of panicking.
static VALIDATOR: Lazy<Result<jsonschema::Validator, String>> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(RANGE_SCHEMA).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
});

// ============================================================================
// LOADING
// ============================================================================

/// Validate an already-parsed document against the range schema.
/// On failure every violation is reported, in validator order.
pub fn validate_range(range: &Value) -> Result<(), RangeFileError> {
    let validator = VALIDATOR
        .as_ref()
        .map_err(|e| RangeFileError::Schema(e.clone()))?;

    let violations: Vec<String> = validator
        .iter_errors(range)
        .map(|error| error.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(RangeFileError::Validation(violations))
    }
}

/// Parse range file text and validate it.
pub fn parse_range(text: &str) -> Result<Value, RangeFileError> {
    let range: Value = serde_json::from_str(text)?;
    validate_range(&range)?;
    Ok(range)
}

/// Blocking load: read, parse and validate the file at `path`.
pub fn load_range_file(path: &Path) -> Result<Value, RangeFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| RangeFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_range(&text)
}

/// True when `path` carries the range extension (case-insensitive).
pub fn is_range_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(RANGE_EXTENSION))
        .unwrap_or(false)
}
