//! Encoding and serialization of validated SheetEase tables.
//!
//! [`encode::encode_table`] turns a validated table schema and its raw rows into
//! an [`EncodedTable`]; [`serialize`] renders that table as the JSON data
//! artifact the runtime loads.

pub mod encode;
pub mod key;
pub mod record;
pub mod serialize;
pub mod value;

pub use encode::encode_table;
pub use key::{EncodedKey, EnumDomain};
pub use record::{EncodedTable, RowRecord};
pub use value::{MapKey, Value};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        EncodedKey, EncodedTable, EnumDomain, MapKey, RowRecord, Value, encode_table,
        serialize::{render, to_json},
    };
}
