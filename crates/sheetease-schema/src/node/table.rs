use crate::{node::FieldDef, sheet::SourceRef};
use serde::Serialize;

///
/// KeyKind
///
/// Key discipline of a table. The key field is always the first declared
/// field; a composite key also names its partner by field index.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum KeyKind {
    IntKey,
    StringKey,
    CompositeIntKey { second: usize },
}

///
/// TableSchema
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableSchema {
    pub ident: String,
    pub source: SourceRef,
    pub fields: Vec<FieldDef>,
    pub key: KeyKind,
}

impl TableSchema {
    /// Primary key field.
    #[must_use]
    pub fn key_field(&self) -> &FieldDef {
        &self.fields[0]
    }

    /// Second sub-key of a composite key.
    #[must_use]
    pub fn second_key_field(&self) -> Option<&FieldDef> {
        match self.key {
            KeyKind::CompositeIntKey { second } => self.fields.get(second),
            KeyKind::IntKey | KeyKind::StringKey => None,
        }
    }

    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    #[must_use]
    pub const fn is_string_keyed(&self) -> bool {
        matches!(self.key, KeyKind::StringKey)
    }

    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self.key, KeyKind::CompositeIntKey { .. })
    }
}
