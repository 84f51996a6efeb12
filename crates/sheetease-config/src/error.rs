use sheetease_schema::sheet::LayoutError;
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown layout preset '{0}', expected 'compact' or 'classic'")]
    UnknownPreset(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid config: {0}")]
    Invalid(String),
}
