use crate::types::TypeDescriptor;
use serde::Serialize;

///
/// FieldDef
///
/// One validated column. `ident` is the sanitized identifier used in
/// generated code; `source_name` is the name as authored, which keys the
/// data artifact.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldDef {
    pub ident: String,
    pub source_name: String,
    pub ty: TypeDescriptor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    pub required: bool,
    pub source_column: usize,
}
