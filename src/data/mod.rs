// Data module for sample documents and tabular form input
// Author: Gabriel Demetrios Lafis

mod paths;
mod table;

pub use paths::*;
pub use table::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dot-joined location of a leaf value inside a sample JSON document
pub type FieldPath = String;

/// The raw, editable cells of one table row (key, value, description, ...)
pub type InputRow = Vec<String>;

/// A key/value/description entry read from a table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRow {
    pub key: String,
    pub value: String,
    pub description: String,
}

impl TableRow {
    /// Create a new table row
    pub fn new(key: &str, value: &str, description: &str) -> Self {
        TableRow {
            key: key.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }
}

/// Create a blank row with empty key, value and description cells
pub fn blank_row() -> InputRow {
    vec![String::new(); 3]
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}
