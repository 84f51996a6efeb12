mod r#enum;
mod field;
mod table;

pub use self::r#enum::*;
pub use self::field::*;
pub use self::table::*;
