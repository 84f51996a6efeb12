use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, btree_map};

///
/// ConfigTable
///
/// Implemented by every generated `{T}Config` accessor.
///

pub trait ConfigTable: 'static {
    /// Table name as validated by the exporter.
    const NAME: &'static str;

    /// Data artifact file name.
    const DATA_FILE: &'static str;

    /// Row record type.
    type Info: DeserializeOwned + Send + Sync + 'static;
}

///
/// TableData
///
/// Rows of one loaded table, ordered by key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableData<I> {
    rows: BTreeMap<i32, I>,
}

impl<I> TableData<I> {
    #[must_use]
    pub const fn new(rows: BTreeMap<i32, I>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn get(&self, key: i32) -> Option<&I> {
        self.rows.get(&key)
    }

    pub fn filter(&self, mut predicate: impl FnMut(&I) -> bool) -> Vec<&I> {
        self.rows.values().filter(|row| predicate(row)).collect()
    }

    pub fn select<R>(&self, selector: impl FnMut(&I) -> R) -> Vec<R> {
        self.rows.values().map(selector).collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, i32, I> {
        self.rows.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<I> Default for TableData<I> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<I> FromIterator<(i32, I)> for TableData<I> {
    fn from_iter<T: IntoIterator<Item = (i32, I)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, I> IntoIterator for &'a TableData<I> {
    type Item = (&'a i32, &'a I);
    type IntoIter = btree_map::Iter<'a, i32, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
