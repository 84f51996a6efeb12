use crate::key::KeyRangeError;
use std::io;
use thiserror::Error as ThisError;

///
/// LoadError
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("data file '{file}' not found")]
    Missing { file: String },

    #[error("failed to read data file '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse data file '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

///
/// ParseKeyError
///
/// A name that is not a member of a generated keys enum.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{text}' is not a key of table '{table}'")]
pub struct ParseKeyError {
    pub table: &'static str,
    pub text: String,
}

impl ParseKeyError {
    pub fn new(table: &'static str, text: impl Into<String>) -> Self {
        Self {
            table,
            text: text.into(),
        }
    }
}

///
/// LookupError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum LookupError {
    #[error("table '{table}' has no row with key {key}")]
    NotFound { table: &'static str, key: i32 },

    #[error("table '{table}' has not been loaded")]
    NotLoaded { table: &'static str },

    #[error(transparent)]
    KeyRange(#[from] KeyRangeError),

    #[error(transparent)]
    UnknownKey(#[from] ParseKeyError),
}

impl LookupError {
    /// Both a missing row and a table that was never loaded count as
    /// "not found" to callers.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotLoaded { .. })
    }
}
