use derive_more::Display;
use serde::{Serialize, Serializer, ser::SerializeMap};

///
/// MapKey
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MapKey {
    Int(i32),
    String(String),
}

///
/// Value
///
/// One encoded cell. Maps keep the authored pair order.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f64),
    String(String),
    List(Vec<Self>),
    Map(Vec<(MapKey, Self)>),
}

impl Value {
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i32(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
        }
    }
}
