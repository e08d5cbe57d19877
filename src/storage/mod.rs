// Storage module for named, persisted values
// Author: Gabriel Demetrios Lafis

mod file;
mod memory;
mod preset;

pub use file::*;
pub use memory::*;
pub use preset::*;

use thiserror::Error;

use crate::data::DataError;

/// A named store of text values
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Get the value stored under a key
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value under a key, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// List all keys
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// Represents an error in the storage module
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Data error: {0}")]
    DataError(#[from] DataError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("{0}")]
    Validation(String),
    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::DataError(DataError::from(err))
    }
}
