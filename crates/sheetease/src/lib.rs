//! SheetEase: a schema-driven spreadsheet export compiler.
//!
//! Worksheets with a small typed header are validated and compiled into a
//! JSON data file plus Rust accessor code per table. The [`export`] module
//! drives a whole run; the other crates are re-exported for callers that
//! need a single stage.

pub mod export;
mod macros;

pub use sheetease_build as codegen;
pub use sheetease_config as config;
pub use sheetease_core as data;
pub use sheetease_runtime as runtime;
pub use sheetease_schema as schema;

pub use export::{ExportError, ExportReport, Exporter};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::ExportConfig,
        export::{
            ArtifactKind, CompileOptions, Compilation, ExportError, ExportReport, Exporter,
            Workbook, compile,
        },
        schema::prelude::*,
    };
}
