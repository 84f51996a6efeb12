use crate::error::LoadError;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

///
/// DataSource
///
/// Where data artifacts are read from at runtime.
///

pub trait DataSource {
    fn read(&self, file: &str) -> Result<Vec<u8>, LoadError>;
}

///
/// DirSource
///

#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    fn read(&self, file: &str) -> Result<Vec<u8>, LoadError> {
        fs::read(self.root.join(file)).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::Missing {
                file: file.to_string(),
            },
            _ => LoadError::Io {
                file: file.to_string(),
                source,
            },
        })
    }
}

///
/// MemorySource
///
/// In-memory files, for tests and for embedding artifacts with
/// `include_bytes!`.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(file.into(), bytes.into());
    }

    #[must_use]
    pub fn with(mut self, file: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(file, bytes);
        self
    }
}

impl DataSource for MemorySource {
    fn read(&self, file: &str) -> Result<Vec<u8>, LoadError> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| LoadError::Missing {
                file: file.to_string(),
            })
    }
}

///
/// TESTS
///
