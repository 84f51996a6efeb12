use crate::{
    error::{LoadError, LookupError},
    source::DataSource,
    table::{ConfigTable, TableData},
};
use std::{
    any::{Any, TypeId},
    collections::{BTreeMap, HashMap},
};
use tracing::debug;

///
/// ConfigContext
///
/// Owns every loaded table, keyed by accessor type. Callers create one and
/// pass it to the generated accessors; there is no process-wide registry.
///

#[derive(Default)]
pub struct ConfigContext {
    tables: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ConfigContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse `T::DATA_FILE`, replacing any previous load.
    /// Returns the number of rows.
    pub fn load<T: ConfigTable>(&mut self, source: &dyn DataSource) -> Result<usize, LoadError> {
        let bytes = source.read(T::DATA_FILE)?;
        let rows: BTreeMap<i32, T::Info> =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
                file: T::DATA_FILE.to_string(),
                source,
            })?;
        let len = rows.len();

        debug!(table = T::NAME, rows = len, "loaded config table");
        self.insert::<T>(TableData::new(rows));

        Ok(len)
    }

    /// Install already-built rows for `T`.
    pub fn insert<T: ConfigTable>(&mut self, data: TableData<T::Info>) {
        self.tables.insert(TypeId::of::<T>(), Box::new(data));
    }

    pub fn table<T: ConfigTable>(&self) -> Result<&TableData<T::Info>, LookupError> {
        self.tables
            .get(&TypeId::of::<T>())
            .and_then(|table| table.downcast_ref::<TableData<T::Info>>())
            .ok_or(LookupError::NotLoaded { table: T::NAME })
    }

    pub fn get<T: ConfigTable>(&self, key: i32) -> Result<&T::Info, LookupError> {
        self.table::<T>()?
            .get(key)
            .ok_or(LookupError::NotFound { table: T::NAME, key })
    }

    #[must_use]
    pub fn is_loaded<T: ConfigTable>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    /// Number of loaded tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

///
/// TESTS
///
