use serde::Deserialize;
use std::path::PathBuf;

///
/// RawConfig
///
/// On-disk shape of `sheetease.toml`. Every section is optional.
///

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub input: Option<PathBuf>,

    #[serde(default)]
    pub output: RawOutput,

    #[serde(default)]
    pub layout: RawLayout,

    #[serde(default)]
    pub naming: RawNaming,

    #[serde(default)]
    pub behavior: RawBehavior,
}

///
/// OneOrMany
///

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<PathBuf> {
        match self {
            Self::One(path) => vec![path],
            Self::Many(paths) => paths,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOutput {
    pub data: Option<OneOrMany>,
    pub code: Option<PathBuf>,
    pub enums: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLayout {
    pub preset: Option<String>,
    pub type_row: Option<usize>,
    pub name_row: Option<usize>,
    pub description_row: Option<usize>,
    pub remark_row: Option<usize>,
    pub label_row: Option<usize>,
    pub default_row: Option<usize>,
    pub data_row: Option<usize>,
    pub first_column: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNaming {
    pub data_file: Option<String>,
    pub runtime_crate: Option<String>,
    pub enum_sheet_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBehavior {
    pub diff_only: Option<bool>,
    pub dry_run: Option<bool>,
    pub prune: Option<bool>,
    pub pretty: Option<bool>,
    pub skip_lowercase_files: Option<bool>,
}
