use crate::{key::EncodedKey, key::EnumDomain, value::Value};
use sheetease_schema::node::TableSchema;

///
/// RowRecord
///
/// One encoded row; `values` align with the schema's fields.
///

#[derive(Clone, Debug, PartialEq)]
pub struct RowRecord {
    pub line: usize,
    pub key: EncodedKey,
    pub values: Vec<Value>,
}

///
/// EncodedTable
///
/// A table that passed encoding. Rows keep sheet order and have unique keys.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EncodedTable {
    pub schema: TableSchema,
    pub rows: Vec<RowRecord>,

    /// Present for string-keyed tables only.
    pub domain: Option<EnumDomain>,
}

impl EncodedTable {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.ident
    }

    #[must_use]
    pub fn get(&self, key: i32) -> Option<&RowRecord> {
        self.rows.iter().find(|row| row.key.value() == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.iter().map(|row| row.key.value())
    }
}
