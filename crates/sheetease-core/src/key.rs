use derive_more::Display;
use serde::Serialize;
use std::collections::HashMap;

///
/// EncodedKey
///
/// Row key as it appears in the data artifact. Every variant reduces to
/// one `i32`, which is the artifact key and the runtime lookup id.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum EncodedKey {
    #[display("{_0}")]
    Int(i32),

    #[display("{name} ({ordinal})")]
    Ordinal { ordinal: i32, name: String },

    #[display("({key1}, {key2})")]
    Composite { key: i32, key1: i32, key2: i32 },
}

impl EncodedKey {
    /// Integer written to the artifact.
    #[must_use]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Int(key) => *key,
            Self::Ordinal { ordinal, .. } => *ordinal,
            Self::Composite { key, .. } => *key,
        }
    }
}

///
/// EnumDomain
///
/// Sanitized string keys of a `StringKey` table in first-appearance order.
/// A key's ordinal is its position.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EnumDomain {
    names: Vec<String>,

    #[serde(skip)]
    index: HashMap<String, i32>,
}

impl EnumDomain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordinal of `name`, assigning the next one on first sight.
    pub fn intern(&mut self, name: &str) -> i32 {
        if let Some(&ordinal) = self.index.get(name) {
            return ordinal;
        }

        let ordinal = i32::try_from(self.names.len()).unwrap_or(i32::MAX);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), ordinal);

        ordinal
    }

    #[must_use]
    pub fn ordinal(&self, name: &str) -> Option<i32> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, ordinal: i32) -> Option<&str> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// `(ordinal, name)` pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.names
            .iter()
            .zip(0..)
            .map(|(name, ordinal)| (ordinal, name.as_str()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

///
/// TESTS
///
