//! Export orchestration.
//!
//! [`compile`] turns in-memory workbooks into artifacts without touching
//! the filesystem. [`Exporter`] wraps it with discovery, workbook reading,
//! writing and pruning for a configured run.

mod compile;
mod discover;
mod workbook;
mod write;

pub use compile::*;
pub use discover::*;
pub use workbook::*;
pub use write::WriteOutcome;

use rayon::prelude::*;
use serde::Serialize;
use sheetease_build::PathError;
use sheetease_config::{ConfigError, ExportConfig};
use sheetease_schema::error::Diagnostics;
use std::{
    collections::BTreeSet,
    error::Error,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{info, warn};

///
/// ExportError
///
/// Conditions that abort a run. Problems in the sheets themselves are
/// diagnostics, never an `ExportError`.
///

#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("generated file '{file_name}' would be written twice")]
    DuplicateArtifact { file_name: String },

    #[error("failed to read '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error(transparent)]
    RuntimePath(#[from] PathError),

    #[error("failed to serialize table '{table}': {source}")]
    Serialize {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// ExportReport
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportReport {
    /// Tables that produced artifacts, in discovery order.
    pub tables: Vec<String>,
    pub enums: Vec<String>,
    pub workbooks: usize,

    /// Files written, or that would be written on a dry run.
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
    pub skipped_inputs: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
    pub dry_run: bool,
}

impl ExportReport {
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

///
/// Exporter
///

#[derive(Debug)]
pub struct Exporter<R = CalamineReader> {
    config: ExportConfig,
    options: CompileOptions,
    reader: R,
}

impl Exporter {
    /// Exporter reading workbooks from disk with `calamine`.
    pub fn new(config: ExportConfig) -> Result<Self, ExportError> {
        Self::with_reader(config, CalamineReader)
    }
}

impl<R: WorkbookReader> Exporter<R> {
    pub fn with_reader(config: ExportConfig, reader: R) -> Result<Self, ExportError> {
        config.check()?;
        let options = CompileOptions::from_config(&config)?;

        Ok(Self {
            config,
            options,
            reader,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Validate every input without writing anything.
    pub fn check(&self) -> Result<ExportReport, ExportError> {
        let (discovery, workbooks) = self.read_inputs()?;
        let compilation = compile(&workbooks, &self.options)?;

        Ok(Self::report(&discovery, &workbooks, compilation, true))
    }

    /// Full export: discover, read, compile, write, prune.
    pub fn run(&self) -> Result<ExportReport, ExportError> {
        let behavior = self.config.behavior;
        let (discovery, workbooks) = self.read_inputs()?;
        let compilation = compile(&workbooks, &self.options)?;

        let placements = write::place(&compilation.artifacts, &self.config);
        let outcomes = write::write_all(&placements, behavior)?;
        let produced: BTreeSet<PathBuf> = placements.iter().map(|p| p.path.clone()).collect();

        let mut report = Self::report(&discovery, &workbooks, compilation, behavior.dry_run);
        for (path, outcome) in outcomes {
            match outcome {
                WriteOutcome::Written => report.written.push(path),
                WriteOutcome::Unchanged => report.unchanged.push(path),
            }
        }

        if behavior.prune {
            if report.has_diagnostics() {
                warn!(
                    diagnostics = report.diagnostics.len(),
                    "skipping prune: run reported diagnostics"
                );
            } else {
                report.pruned = write::prune(&self.output_dirs(), &produced, behavior.dry_run)?;
            }
        }

        info!(
            tables = report.tables.len(),
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            pruned = report.pruned.len(),
            diagnostics = report.diagnostics.len(),
            dry_run = report.dry_run,
            "export finished"
        );

        Ok(report)
    }

    // read_inputs
    // workbooks are read in parallel and kept in discovery order
    fn read_inputs(&self) -> Result<(Discovery, Vec<Workbook>), ExportError> {
        let input = &self.config.input;
        let discovery = discover(input, self.config.behavior.skip_lowercase_files)?;
        info!(input = %input.display(), files = discovery.files.len(), "discovered workbooks");

        let workbooks = discovery
            .files
            .par_iter()
            .map(|path| {
                let sheets = self.reader.read(path)?;

                Ok(Workbook {
                    path: path.clone(),
                    name: display_name(input, path),
                    sheets,
                })
            })
            .collect::<Result<Vec<_>, ExportError>>()?;

        Ok((discovery, workbooks))
    }

    fn output_dirs(&self) -> Vec<&Path> {
        let config = &self.config;

        config
            .data_dirs
            .iter()
            .map(PathBuf::as_path)
            .chain(config.code_dir.as_deref())
            .chain(config.enum_dir())
            .collect()
    }

    fn report(
        discovery: &Discovery,
        workbooks: &[Workbook],
        compilation: Compilation,
        dry_run: bool,
    ) -> ExportReport {
        ExportReport {
            tables: compilation.table_names().map(str::to_string).collect(),
            enums: compilation.enums.iter().map(|e| e.ident.clone()).collect(),
            workbooks: workbooks.len(),
            skipped_inputs: discovery.skipped.clone(),
            diagnostics: compilation.diagnostics,
            dry_run,
            ..ExportReport::default()
        }
    }
}

// display_name
// path relative to the input root, or the file name for a single-file input
fn display_name(input: &Path, path: &Path) -> String {
    let relative = path
        .strip_prefix(input)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| path.file_name().map(Path::new))
        .unwrap_or(path);

    relative.to_string_lossy().replace('\\', "/")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_relative_to_the_input() {
        let root = Path::new("/game/Excel");

        assert_eq!(display_name(root, &root.join("items/Weapon.xlsx")), "items/Weapon.xlsx");
        assert_eq!(
            display_name(&root.join("Skill.xlsx"), &root.join("Skill.xlsx")),
            "Skill.xlsx"
        );
    }

    #[test]
    fn exporter_rejects_config_without_data_dir() {
        let mut config = ExportConfig::new("in", "out");
        config.data_dirs.clear();

        assert!(matches!(
            Exporter::new(config),
            Err(ExportError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn exporter_rejects_bad_runtime_path() {
        let mut config = ExportConfig::new("in", "out");
        config.naming.runtime_crate = "game::<T>".to_string();

        assert!(matches!(
            Exporter::new(config),
            Err(ExportError::RuntimePath(_))
        ));
    }
}
