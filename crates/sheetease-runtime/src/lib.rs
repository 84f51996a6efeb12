//! Runtime half of SheetEase.
//!
//! Generated accessor code links against this crate: it provides the
//! composite key math shared with the exporter, the [`ConfigTable`] trait,
//! data sources and the [`ConfigContext`] that owns loaded tables.

mod context;
mod error;
mod key;
mod source;
mod table;

pub use context::ConfigContext;
pub use error::{LoadError, LookupError, ParseKeyError};
pub use key::{COMPOSITE_MULTIPLIER, KeyRangeError, combine_key, split_key};
pub use source::{DataSource, DirSource, MemorySource};
pub use table::{ConfigTable, TableData};

///
/// Re-exports used by generated code. Not part of the public API.
///

#[doc(hidden)]
pub mod __reexports {
    pub use serde;
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ConfigContext, ConfigTable, DataSource, DirSource, LoadError, LookupError, MemorySource,
        TableData,
    };
}
