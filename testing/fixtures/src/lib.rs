//! Accessors generated from `workbooks/` by the build script.
//!
//! Data files are written to `$OUT_DIR/data`; [`data_source`] points the
//! runtime at them.

use sheetease_runtime::{ConfigContext, DirSource, LoadError};

///
/// Generated
///

#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/code/manifest.rs"));
    include!(concat!(env!("OUT_DIR"), "/code/quality.rs"));

    include!(concat!(env!("OUT_DIR"), "/code/weapon_info.rs"));
    include!(concat!(env!("OUT_DIR"), "/code/weapon_config.rs"));

    include!(concat!(env!("OUT_DIR"), "/code/element_info.rs"));
    include!(concat!(env!("OUT_DIR"), "/code/element_config.rs"));
    include!(concat!(env!("OUT_DIR"), "/code/element_keys.rs"));

    include!(concat!(env!("OUT_DIR"), "/code/skill_level_info.rs"));
    include!(concat!(env!("OUT_DIR"), "/code/skill_level_config.rs"));
}

/// Directory holding the exported JSON files.
pub const DATA_DIR: &str = concat!(env!("OUT_DIR"), "/data");

#[must_use]
pub fn data_source() -> DirSource {
    DirSource::new(DATA_DIR)
}

/// Context with every fixture table loaded.
pub fn load_context() -> Result<ConfigContext, LoadError> {
    let mut ctx = ConfigContext::new();
    generated::load_all(&mut ctx, &data_source())?;

    Ok(ctx)
}
