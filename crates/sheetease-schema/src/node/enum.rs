use crate::sheet::SourceRef;
use serde::Serialize;

///
/// EnumSchema
///
/// Validated standalone enumeration from an enum sheet.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumSchema {
    pub ident: String,
    pub source: SourceRef,
    pub members: Vec<EnumMember>,
}

///
/// EnumMember
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumMember {
    pub ident: String,
    pub value: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
