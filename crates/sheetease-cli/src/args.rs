use clap::{ArgAction, Args, Parser, Subcommand};
use sheetease::{
    ExportError,
    config::{CONFIG_FILE_NAME, ConfigError, ExportConfig},
    schema::sheet::HeaderLayout,
};
use std::path::{Path, PathBuf};

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "sheetease", version)]
#[command(about = "Compile game config workbooks into JSON data and Rust accessors")]
pub struct Cli {
    /// More log output (-vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

///
/// Command
///

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export workbooks to data files and generated code
    Export(ExportArgs),

    /// Validate workbooks without writing anything
    Check(CheckArgs),
}

///
/// SourceArgs
///
/// Options shared by every command.
///

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Config file [default: ./sheetease.toml when present]
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Header layout preset
    #[arg(long, value_parser = ["compact", "classic"])]
    pub layout: Option<String>,
}

impl SourceArgs {
    fn load(&self, input: Option<&Path>) -> Result<ExportConfig, ExportError> {
        let file = self.config.clone().or_else(|| {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            default.is_file().then_some(default)
        });

        let mut config = match file {
            Some(path) => ExportConfig::from_file(&path)?,
            None => {
                let mut config = ExportConfig::new(".", ".");
                config.data_dirs.clear();
                config
            }
        };

        if let Some(input) = input {
            config.input = input.to_path_buf();
        }
        if let Some(name) = &self.layout {
            config.layout = HeaderLayout::preset(name)
                .ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?;
        }

        Ok(config)
    }
}

///
/// ExportArgs
///

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExportArgs {
    /// Workbook file or directory
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Data output directory
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Generated code directory
    #[arg(value_name = "CODE_DIR")]
    pub code_dir: Option<PathBuf>,

    /// Keys and enum directory [default: CODE_DIR]
    #[arg(value_name = "ENUM_DIR")]
    pub enum_dir: Option<PathBuf>,

    /// Additional data output directory (repeatable)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dirs: Vec<PathBuf>,

    #[arg(long = "code-dir", value_name = "DIR")]
    pub code_dir_flag: Option<PathBuf>,

    #[arg(long = "enum-dir", value_name = "DIR")]
    pub enum_dir_flag: Option<PathBuf>,

    /// Rewrite files even when their content is unchanged
    #[arg(long)]
    pub no_diff: bool,

    /// Report what would be written without touching the disk
    #[arg(long)]
    pub dry_run: bool,

    /// Delete files in output directories that this run did not produce
    #[arg(long)]
    pub prune: bool,

    /// Write single-line JSON
    #[arg(long)]
    pub compact_json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ExportArgs {
    /// Config file (if any) with command-line overrides applied.
    pub fn config(&self) -> Result<ExportConfig, ExportError> {
        let mut config = self.source.load(self.input.as_deref())?;

        let data_dirs: Vec<_> = self.data_dir.iter().chain(&self.data_dirs).cloned().collect();
        if !data_dirs.is_empty() {
            config.data_dirs = data_dirs;
        }
        if let Some(dir) = self.code_dir_flag.as_ref().or(self.code_dir.as_ref()) {
            config.code_dir = Some(dir.clone());
        }
        if let Some(dir) = self.enum_dir_flag.as_ref().or(self.enum_dir.as_ref()) {
            config.enum_dir = Some(dir.clone());
        }

        let behavior = &mut config.behavior;
        behavior.diff_only &= !self.no_diff;
        behavior.dry_run |= self.dry_run;
        behavior.prune |= self.prune;
        behavior.pretty &= !self.compact_json;

        Ok(config)
    }
}

///
/// CheckArgs
///

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Workbook file or directory
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl CheckArgs {
    pub fn config(&self) -> Result<ExportConfig, ExportError> {
        let mut config = self.source.load(self.input.as_deref())?;

        // check never writes, so any directory satisfies validation
        if config.data_dirs.is_empty() {
            config.data_dirs.push(config.input.clone());
        }

        Ok(config)
    }
}

///
/// TESTS
///
