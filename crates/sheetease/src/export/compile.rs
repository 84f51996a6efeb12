use crate::export::{ExportError, Workbook};
use rayon::prelude::*;
use sheetease_build::{GeneratedFile, OutputDir, RuntimePath, TableBuilder, generate_enum, generate_manifest};
use sheetease_config::{ExportConfig, NamingConfig};
use sheetease_core::{encode_table, serialize};
use sheetease_schema::{
    error::{Diagnostic, Diagnostics},
    naming::{NameRegistry, Namespace, NamingPolicy},
    node::{EnumSchema, TableSchema},
    sheet::{HeaderLayout, RowDraft, SourceRef, load_enum, load_table},
    validate::{MANIFEST_STEM, validate_enum, validate_table},
};
use std::collections::HashSet;
use tracing::{debug, error, info};

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArtifactKind {
    Data,
    Code,
    Enums,
}

impl From<OutputDir> for ArtifactKind {
    fn from(dir: OutputDir) -> Self {
        match dir {
            OutputDir::Code => Self::Code,
            OutputDir::Enums => Self::Enums,
        }
    }
}

///
/// Artifact
///
/// One output file, not yet written.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl From<GeneratedFile> for Artifact {
    fn from(file: GeneratedFile) -> Self {
        Self {
            kind: file.dir.into(),
            file_name: file.file_name,
            bytes: file.contents.into_bytes(),
        }
    }
}

///
/// CompileOptions
///

#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub layout: HeaderLayout,
    pub policy: NamingPolicy,
    pub naming: NamingConfig,
    pub runtime: RuntimePath,
    pub pretty: bool,
}

impl CompileOptions {
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        Ok(Self {
            layout: config.layout.clone(),
            policy: NamingPolicy::default(),
            naming: config.naming.clone(),
            runtime: RuntimePath::resolve(&config.naming.runtime_crate)?,
            pretty: config.behavior.pretty,
        })
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            layout: HeaderLayout::default(),
            policy: NamingPolicy::default(),
            naming: NamingConfig::default(),
            runtime: RuntimePath::default(),
            pretty: true,
        }
    }
}

///
/// Compilation
///
/// Result of compiling a set of workbooks. Tables with diagnostics are
/// absent from `tables` and produce no artifacts.
///

#[derive(Clone, Debug, Default)]
pub struct Compilation {
    pub tables: Vec<TableSchema>,
    pub enums: Vec<EnumSchema>,
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind, file_name: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.kind == kind && a.file_name == file_name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.ident.as_str())
    }
}

// Validated table waiting for encoding.
struct Pending {
    schema: TableSchema,
    rows: Vec<RowDraft>,
}

/// Compile workbooks into artifacts.
///
/// Loading, validation and name registration run sequentially in workbook
/// then sheet order, so name collisions are reported deterministically.
/// Encoding and generation then run in parallel per table.
pub fn compile(workbooks: &[Workbook], options: &CompileOptions) -> Result<Compilation, ExportError> {
    let mut registry = NameRegistry::new();
    registry.reserve(Namespace::Files, MANIFEST_STEM, "the manifest");
    let mut diagnostics = Diagnostics::new();
    let mut pending = Vec::new();
    let mut enums = Vec::new();
    let prefix = options.naming.enum_sheet_prefix.as_str();

    // Phase 1: load + validate, sequential.
    for workbook in workbooks {
        info!(file = %workbook.name, sheets = workbook.sheets.len(), "compiling workbook");

        for grid in &workbook.sheets {
            let source = SourceRef::new(Some(workbook.name.clone()), grid.name.clone());

            if grid.name.starts_with(prefix) {
                let draft = load_enum(grid, &source, prefix);
                match validate_enum(&draft, &mut registry, &options.policy) {
                    Ok(schema) => enums.push(schema),
                    Err(errs) => report(&mut diagnostics, &source, errs),
                }
                continue;
            }

            let validated = load_table(grid, &source, &options.layout)
                .and_then(|draft| {
                    validate_table(&draft, &mut registry, &options.policy)
                        .map(|schema| Pending { schema, rows: draft.rows })
                });
            match validated {
                Ok(table) => pending.push(table),
                Err(errs) => report(&mut diagnostics, &source, errs),
            }
        }
    }

    // Phase 2: encode + generate, parallel per table, collected in order.
    let results: Vec<_> = pending
        .par_iter()
        .map(|table| build_table(table, options))
        .collect();

    let mut tables = Vec::new();
    let mut artifacts = Vec::new();
    for (table, result) in pending.iter().zip(results) {
        match result? {
            Ok(files) => {
                info!(table = %table.schema.ident, rows = table.rows.len(), "table compiled");
                tables.push(table.schema.clone());
                artifacts.extend(files);
            }
            Err(errs) => report(&mut diagnostics, &table.schema.source, errs),
        }
    }

    artifacts.extend(enums.iter().map(|schema| Artifact::from(generate_enum(schema))));
    artifacts.push(generate_manifest(&tables, &options.runtime).into());
    check_unique(&artifacts)?;

    Ok(Compilation {
        tables,
        enums,
        artifacts,
        diagnostics,
    })
}

// build_table
// data artifact plus generated code for one table; the outer error is
// fatal, the inner one is the table's diagnostics
fn build_table(
    table: &Pending,
    options: &CompileOptions,
) -> Result<Result<Vec<Artifact>, Diagnostics>, ExportError> {
    let encoded = match encode_table(&table.schema, &table.rows, &options.policy) {
        Ok(encoded) => encoded,
        Err(errs) => return Ok(Err(errs)),
    };

    let data_file = options.naming.data_file_name(&encoded.schema.ident);
    let bytes = serialize::render(&encoded, options.pretty).map_err(|source| {
        ExportError::Serialize {
            table: encoded.schema.ident.clone(),
            source,
        }
    })?;

    let mut artifacts = vec![Artifact {
        kind: ArtifactKind::Data,
        file_name: data_file.clone(),
        bytes,
    }];
    artifacts.extend(
        TableBuilder::new(&encoded, &data_file, &options.runtime)
            .generate()
            .into_iter()
            .map(Artifact::from),
    );
    debug!(table = %encoded.schema.ident, files = artifacts.len(), "generated artifacts");

    Ok(Ok(artifacts))
}

// check_unique
// no two artifacts may land on the same file; code and enum files can share
// a directory, so only data files are kept apart
fn check_unique(artifacts: &[Artifact]) -> Result<(), ExportError> {
    let mut seen = HashSet::new();

    for artifact in artifacts {
        let is_data = artifact.kind == ArtifactKind::Data;
        if !seen.insert((is_data, artifact.file_name.as_str())) {
            return Err(ExportError::DuplicateArtifact {
                file_name: artifact.file_name.clone(),
            });
        }
    }

    Ok(())
}

fn report(diagnostics: &mut Diagnostics, source: &SourceRef, errs: Diagnostics) {
    error!(sheet = %source, count = errs.len(), "sheet excluded from export");
    for diag in errs.iter() {
        debug!(%diag, "diagnostic");
    }
    diagnostics.extend(errs);
}

/// Diagnostics sorted for display: by file, sheet, then row.
#[must_use]
pub fn sorted_diagnostics(diagnostics: &Diagnostics) -> Vec<&Diagnostic> {
    let mut sorted: Vec<_> = diagnostics.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.location.file, &a.location.sheet, a.location.row)
            .cmp(&(&b.location.file, &b.location.sheet, b.location.row))
    });

    sorted
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use sheetease_schema::{error::DiagnosticKind, sheet::SheetGrid};

    fn grid(name: &str, rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::from_rows(name, rows.iter().map(|r| r.iter().copied()))
    }

    fn weapons() -> SheetGrid {
        grid(
            "Weapon",
            &[
                &["int", "string"],
                &["id", "name"],
                &["Id", "Display name"],
                &["1", "Sword"],
                &["2", "Bow"],
                &["3", "Staff"],
            ],
        )
    }

    fn json(compilation: &Compilation, file: &str) -> serde_json::Value {
        let artifact = compilation.artifact(ArtifactKind::Data, file).unwrap();
        serde_json::from_slice(&artifact.bytes).unwrap()
    }

    #[test]
    fn valid_table_produces_data_code_and_manifest() {
        let books = [Workbook::new("Items.xlsx", vec![weapons()])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        assert!(out.is_clean());
        assert_eq!(out.table_names().collect::<Vec<_>>(), ["Weapon"]);

        let data = json(&out, "WeaponConfig.json");
        let keys: Vec<_> = data.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["1", "2", "3"]);
        assert_eq!(data["2"]["name"], "Bow");

        assert!(out.artifact(ArtifactKind::Code, "weapon_info.rs").is_some());
        assert!(out.artifact(ArtifactKind::Code, "weapon_config.rs").is_some());
        assert!(out.artifact(ArtifactKind::Code, "manifest.rs").is_some());
        assert!(out.artifact(ArtifactKind::Enums, "weapon_keys.rs").is_none());
    }

    #[test]
    fn broken_sheet_does_not_stop_others() {
        let broken = grid(
            "Armor",
            &[&["int", "string", "string"], &["id", "name", "name"], &[], &["1", "a", "b"]],
        );
        let books = [Workbook::new("Items.xlsx", vec![broken, weapons()])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(
            out.diagnostics.iter().next().unwrap().kind,
            DiagnosticKind::DuplicateIdentifier
        );
        assert_eq!(out.table_names().collect::<Vec<_>>(), ["Weapon"]);
        assert!(out.artifact(ArtifactKind::Data, "ArmorConfig.json").is_none());
        assert!(out.artifact(ArtifactKind::Data, "WeaponConfig.json").is_some());
    }

    #[test]
    fn table_names_collide_across_workbooks_in_discovery_order() {
        let books = [
            Workbook::new("A.xlsx", vec![weapons()]),
            Workbook::new("B.xlsx", vec![weapons()]),
        ];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        assert_eq!(out.diagnostics.len(), 1);
        let diag = out.diagnostics.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::DuplicateIdentifier);
        assert_eq!(diag.location.file.as_deref(), Some("B.xlsx"));
        assert_eq!(out.tables.len(), 1);
    }

    #[test]
    fn generated_names_share_one_namespace() {
        let elements = grid("Element", &[&["string"], &["name"], &[], &["Fire"]]);
        let element_keys = grid("Enum-ElementKeys", &[&["name", "value"], &["Fire", "0"]]);
        let manifest = grid("Enum-Manifest", &[&["name", "value"], &["Main", "0"]]);
        let ab = |name: &str| grid(name, &[&["int"], &["id"], &[], &["1"]]);

        let books = [
            Workbook::new("Magic.xlsx", vec![elements, element_keys]),
            Workbook::new("Tests.xlsx", vec![ab("ABTest"), ab("AbTest"), manifest]),
        ];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        let sheets: Vec<_> = out
            .diagnostics
            .iter()
            .map(|d| d.location.sheet.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(sheets, ["Enum-ElementKeys", "AbTest", "AbTest", "Enum-Manifest"]);
        assert!(out.diagnostics.iter().all(|d| d.kind == DiagnosticKind::DuplicateIdentifier));

        assert_eq!(out.table_names().collect::<Vec<_>>(), ["Element", "ABTest"]);
        assert!(out.enums.is_empty());

        let mut files: Vec<_> = out.artifacts.iter().map(|a| a.file_name.as_str()).collect();
        let total = files.len();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), total);
    }

    #[test]
    fn artifacts_never_share_a_file() {
        let artifact = |kind, file_name: &str| Artifact {
            kind,
            file_name: file_name.to_string(),
            bytes: Vec::new(),
        };

        let distinct = [
            artifact(ArtifactKind::Data, "weapon_info.rs"),
            artifact(ArtifactKind::Code, "weapon_info.rs"),
            artifact(ArtifactKind::Enums, "weapon_keys.rs"),
        ];
        assert!(check_unique(&distinct).is_ok());

        let clash = [
            artifact(ArtifactKind::Code, "weapon_keys.rs"),
            artifact(ArtifactKind::Enums, "weapon_keys.rs"),
        ];
        assert!(matches!(
            check_unique(&clash),
            Err(ExportError::DuplicateArtifact { file_name }) if file_name == "weapon_keys.rs"
        ));
    }

    #[test]
    fn string_keys_get_a_keys_enum() {
        let elements = grid(
            "Element",
            &[
                &["string", "int"],
                &["name", "power"],
                &[],
                &["Fire", "3"],
                &["Ice", "2"],
            ],
        );
        let books = [Workbook::new("Magic.xlsx", vec![elements])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        let data = json(&out, "ElementConfig.json");
        assert_eq!(data["0"]["name"], "Fire");
        assert_eq!(data["1"]["power"], 2);

        let keys = out.artifact(ArtifactKind::Enums, "element_keys.rs").unwrap();
        let code: String = String::from_utf8_lossy(&keys.bytes)
            .split_whitespace()
            .collect();
        assert!(code.contains("Fire=0,Ice=1"));
    }

    #[test]
    fn duplicate_string_key_excludes_table() {
        let elements = grid(
            "Element",
            &[&["string"], &["name"], &[], &["Fire"], &["Ice"], &["Fire"]],
        );
        let books = [Workbook::new("Magic.xlsx", vec![elements])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        let diag = out.diagnostics.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::DuplicateKey);
        assert_eq!(diag.location.row, Some(6));
        assert!(out.tables.is_empty());
    }

    #[test]
    fn composite_key_out_of_range_has_no_artifact() {
        let levels = grid(
            "SkillLevel",
            &[
                &["int", "int|key", "int"],
                &["skill", "level", "cost"],
                &[],
                &["46340", "1", "10"],
            ],
        );
        let books = [Workbook::new("Skills.xlsx", vec![levels])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        assert!(out.diagnostics.contains(DiagnosticKind::KeyOutOfRange));
        assert!(out.artifact(ArtifactKind::Data, "SkillLevelConfig.json").is_none());
    }

    #[test]
    fn enum_sheets_become_enum_files() {
        let quality = grid(
            "Enum-Quality",
            &[&["name", "value", "remark"], &["Common", "0", ""], &["Rare", "1", ""]],
        );
        let books = [Workbook::new("Items.xlsx", vec![weapons(), quality])];
        let out = compile(&books, &CompileOptions::default()).unwrap();

        assert!(out.is_clean());
        assert_eq!(out.enums.len(), 1);
        assert!(out.artifact(ArtifactKind::Enums, "quality.rs").is_some());
        assert_eq!(out.tables.len(), 1);
    }

    #[test]
    fn compact_json_and_custom_file_names() {
        let options = CompileOptions {
            pretty: false,
            naming: NamingConfig {
                data_file: "{name}.json".to_string(),
                ..NamingConfig::default()
            },
            ..CompileOptions::default()
        };
        let books = [Workbook::new("Items.xlsx", vec![weapons()])];
        let out = compile(&books, &options).unwrap();

        let artifact = out.artifact(ArtifactKind::Data, "Weapon.json").unwrap();
        assert_eq!(
            String::from_utf8_lossy(&artifact.bytes).lines().count(),
            1
        );
    }
}
