//! Schema layer of the SheetEase export compiler.
//!
//! Turns raw worksheet grids into validated [`node::TableSchema`] values:
//! type tokens are resolved by [`types`], identifiers are sanitized and
//! registered by [`naming`], header blocks are read by [`sheet`] and the
//! structural rules live in [`validate`].

pub mod error;
pub mod naming;
pub mod node;
pub mod sheet;
pub mod types;
pub mod validate;

/// Largest accepted identifier length for tables, fields and enum members.
pub const MAX_IDENT_LEN: usize = 64;

/// Sheet-name prefix that marks a standalone enumeration sheet.
pub const DEFAULT_ENUM_SHEET_PREFIX: &str = "Enum-";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        diag,
        error::{Diagnostic, DiagnosticKind, Diagnostics, Location},
        naming::{NameRegistry, Namespace, NamingError, NamingPolicy},
        node::*,
        sheet::{EnumDraft, HeaderLayout, SheetGrid, SourceRef, TableDraft},
        types::{Primitive, TypeDescriptor, TypeError},
        validate::{validate_enum, validate_table},
    };
    pub use serde::Serialize;
}
