//! Rust code generation for SheetEase tables.
//!
//! Output is meant to be `include!`d into one module of the consumer crate:
//! no `use` items are emitted and every path is absolute. Row data is never
//! embedded; generated accessors read the JSON artifacts at runtime.

mod accessor;
mod r#enum;
mod helper;
mod keys;
mod manifest;
mod paths;
mod record;

#[cfg(test)]
mod test_support;

pub use paths::{PathError, RUNTIME_CRATE_ENV, RuntimePath};

use proc_macro2::{Ident, TokenStream};
use quote::format_ident;
use sheetease_core::{EncodedTable, EnumDomain};
use sheetease_schema::{
    naming::to_snake,
    node::{EnumSchema, TableSchema},
    validate::MANIFEST_STEM,
};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by sheetease. Do not edit.";

///
/// OutputDir
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OutputDir {
    Code,
    Enums,
}

///
/// GeneratedFile
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    pub dir: OutputDir,
    pub file_name: String,
    pub contents: String,
}

impl GeneratedFile {
    fn new(dir: OutputDir, file_name: String, tokens: TokenStream) -> Self {
        Self {
            dir,
            file_name,
            contents: render_file(&tokens),
        }
    }
}

// render_file
#[must_use]
pub fn render_file(tokens: &TokenStream) -> String {
    format!("{GENERATED_HEADER}\n\n{tokens}\n")
}

///
/// TableBuilder
///
/// Generates the record, accessor and (for string keys) keys files of one
/// table.
///

pub struct TableBuilder<'a> {
    pub(crate) schema: &'a TableSchema,
    pub(crate) domain: Option<&'a EnumDomain>,
    pub(crate) data_file: &'a str,
    pub(crate) runtime: &'a RuntimePath,
}

impl<'a> TableBuilder<'a> {
    #[must_use]
    pub fn new(table: &'a EncodedTable, data_file: &'a str, runtime: &'a RuntimePath) -> Self {
        Self {
            schema: &table.schema,
            domain: table.domain.as_ref(),
            data_file,
            runtime,
        }
    }

    #[must_use]
    pub fn generate(&self) -> Vec<GeneratedFile> {
        // file stems are the snake-cased type idents
        let file = |ident: Ident| format!("{}.rs", to_snake(&ident.to_string()));
        let mut files = vec![
            GeneratedFile::new(OutputDir::Code, file(self.info_ident()), record::generate(self)),
            GeneratedFile::new(
                OutputDir::Code,
                file(self.config_ident()),
                accessor::generate(self),
            ),
        ];

        if let Some(domain) = self.domain {
            files.push(GeneratedFile::new(
                OutputDir::Enums,
                file(self.keys_ident()),
                keys::generate(self, domain),
            ));
        }

        files
    }

    pub(crate) fn info_ident(&self) -> Ident {
        format_ident!("{}Info", self.schema.ident)
    }

    pub(crate) fn config_ident(&self) -> Ident {
        format_ident!("{}Config", self.schema.ident)
    }

    pub(crate) fn keys_ident(&self) -> Ident {
        format_ident!("{}Keys", self.schema.ident)
    }
}

/// Standalone enum file for an enum sheet.
#[must_use]
pub fn generate_enum(schema: &EnumSchema) -> GeneratedFile {
    GeneratedFile::new(
        OutputDir::Enums,
        format!("{}.rs", to_snake(&schema.ident)),
        r#enum::generate(schema),
    )
}

/// Manifest listing every generated table accessor.
#[must_use]
pub fn generate_manifest<'a>(
    tables: impl IntoIterator<Item = &'a TableSchema>,
    runtime: &RuntimePath,
) -> GeneratedFile {
    let tables: Vec<&TableSchema> = tables.into_iter().collect();

    GeneratedFile::new(
        OutputDir::Code,
        format!("{MANIFEST_STEM}.rs"),
        manifest::generate(&tables, runtime),
    )
}
