//! Export configuration.
//!
//! A run is described by [`ExportConfig`], read from a TOML file or built
//! in code. Relative paths in a file resolve against the file's directory.

mod error;
mod raw;

pub use error::ConfigError;

use raw::{RawConfig, RawLayout};
use sheetease_schema::{DEFAULT_ENUM_SHEET_PREFIX, sheet::HeaderLayout};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Placeholder replaced by the table name in [`NamingConfig::data_file`].
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "sheetease.toml";

///
/// NamingConfig
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamingConfig {
    pub data_file: String,
    pub runtime_crate: String,
    pub enum_sheet_prefix: String,
}

impl NamingConfig {
    /// Data artifact name for a table.
    #[must_use]
    pub fn data_file_name(&self, table: &str) -> String {
        self.data_file.replace(NAME_PLACEHOLDER, table)
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            data_file: format!("{NAME_PLACEHOLDER}Config.json"),
            runtime_crate: "sheetease_runtime".to_string(),
            enum_sheet_prefix: DEFAULT_ENUM_SHEET_PREFIX.to_string(),
        }
    }
}

///
/// Behavior
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Behavior {
    /// Leave files whose content is unchanged untouched.
    pub diff_only: bool,
    pub dry_run: bool,

    /// Delete files in output directories that the run did not produce.
    pub prune: bool,
    pub pretty: bool,

    /// Skip input files whose name does not start with an uppercase letter.
    pub skip_lowercase_files: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            diff_only: true,
            dry_run: false,
            prune: false,
            pretty: true,
            skip_lowercase_files: true,
        }
    }
}

///
/// ExportConfig
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportConfig {
    pub input: PathBuf,
    pub data_dirs: Vec<PathBuf>,
    pub code_dir: Option<PathBuf>,
    pub enum_dir: Option<PathBuf>,
    pub layout: HeaderLayout,
    pub naming: NamingConfig,
    pub behavior: Behavior,
}

impl ExportConfig {
    /// Config with defaults for everything but the paths.
    pub fn new(input: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            data_dirs: vec![data_dir.into()],
            code_dir: None,
            enum_dir: None,
            layout: HeaderLayout::default(),
            naming: NamingConfig::default(),
            behavior: Behavior::default(),
        }
    }

    /// Read and resolve a config file. Output directories may still be
    /// filled in by the caller, so call [`Self::check`] before exporting.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_raw(raw, base)
    }

    /// Parse TOML text; relative paths resolve against `base`.
    pub fn from_toml_str(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: base.join(CONFIG_FILE_NAME),
            source,
        })?;

        Self::from_raw(raw, base)
    }

    fn from_raw(raw: RawConfig, base: &Path) -> Result<Self, ConfigError> {
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base.join(path)
            }
        };
        let naming_defaults = NamingConfig::default();
        let behavior_defaults = Behavior::default();

        let config = Self {
            input: resolve(raw.input.unwrap_or_default()),
            data_dirs: raw
                .output
                .data
                .map(raw::OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(resolve)
                .collect(),
            code_dir: raw.output.code.map(resolve),
            enum_dir: raw.output.enums.map(resolve),
            layout: layout(raw.layout)?,
            naming: NamingConfig {
                data_file: raw.naming.data_file.unwrap_or(naming_defaults.data_file),
                runtime_crate: raw
                    .naming
                    .runtime_crate
                    .unwrap_or(naming_defaults.runtime_crate),
                enum_sheet_prefix: raw
                    .naming
                    .enum_sheet_prefix
                    .unwrap_or(naming_defaults.enum_sheet_prefix),
            },
            behavior: Behavior {
                diff_only: raw.behavior.diff_only.unwrap_or(behavior_defaults.diff_only),
                dry_run: raw.behavior.dry_run.unwrap_or(behavior_defaults.dry_run),
                prune: raw.behavior.prune.unwrap_or(behavior_defaults.prune),
                pretty: raw.behavior.pretty.unwrap_or(behavior_defaults.pretty),
                skip_lowercase_files: raw
                    .behavior
                    .skip_lowercase_files
                    .unwrap_or(behavior_defaults.skip_lowercase_files),
            },
        };
        config.check_naming()?;

        Ok(config)
    }

    /// Directory for keys and enum files.
    #[must_use]
    pub fn enum_dir(&self) -> Option<&Path> {
        self.enum_dir.as_deref().or(self.code_dir.as_deref())
    }

    /// Full validation, run before every export.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.data_dirs.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one data output directory is required".to_string(),
            ));
        }
        self.layout.check()?;
        self.check_naming()
    }

    fn check_naming(&self) -> Result<(), ConfigError> {
        let naming = &self.naming;

        if !naming.data_file.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "data_file '{}' must contain {NAME_PLACEHOLDER}",
                naming.data_file
            )));
        }
        if naming.data_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "data_file '{}' must be a plain file name",
                naming.data_file
            )));
        }
        if naming.runtime_crate.trim().is_empty() {
            return Err(ConfigError::Invalid("runtime_crate is empty".to_string()));
        }
        if naming.enum_sheet_prefix.is_empty() {
            return Err(ConfigError::Invalid("enum_sheet_prefix is empty".to_string()));
        }

        Ok(())
    }
}

// layout
// preset first, then per-row overrides
fn layout(raw: RawLayout) -> Result<HeaderLayout, ConfigError> {
    let mut layout = match raw.preset.as_deref() {
        None => HeaderLayout::default(),
        Some(name) => {
            HeaderLayout::preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?
        }
    };

    if let Some(row) = raw.type_row {
        layout.type_row = row;
    }
    if let Some(row) = raw.name_row {
        layout.name_row = row;
    }
    if let Some(row) = raw.data_row {
        layout.data_row = row;
    }
    if let Some(column) = raw.first_column {
        layout.first_column = column;
    }
    layout.description_row = raw.description_row.or(layout.description_row);
    layout.remark_row = raw.remark_row.or(layout.remark_row);
    layout.label_row = raw.label_row.or(layout.label_row);
    layout.default_row = raw.default_row.or(layout.default_row);

    layout.check()?;

    Ok(layout)
}

///
/// TESTS
///
