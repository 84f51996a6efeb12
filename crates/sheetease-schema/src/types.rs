use derive_more::Display;
use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// TypeError
///
/// Reasons a type token is rejected. All of them surface as an
/// `UnsupportedTypeToken` diagnostic.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeError {
    #[error("unknown type '{name}' in token '{token}'")]
    UnknownPrimitive { token: String, name: String },

    #[error("malformed type token '{token}': {reason}")]
    Malformed { token: String, reason: &'static str },

    #[error("nested container in type token '{token}' is not supported")]
    Nested { token: String },

    #[error("map key '{key}' in token '{token}' must be int or string")]
    MapKey { token: String, key: Primitive },
}

impl TypeError {
    fn malformed(token: &str, reason: &'static str) -> Self {
        Self::Malformed {
            token: token.to_string(),
            reason,
        }
    }
}

///
/// Primitive
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum Primitive {
    #[display("float")]
    Float,

    #[display("int")]
    Int,

    #[display("string")]
    String,
}

impl Primitive {
    /// Parse an exact primitive name.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "float" => Some(Self::Float),
            "int" => Some(Self::Int),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Primitives allowed as map keys and primary keys.
    #[must_use]
    pub const fn is_key_type(self) -> bool {
        matches!(self, Self::Int | Self::String)
    }
}

///
/// TypeDescriptor
///
/// Structured form of a column's type token. Container elements are
/// primitives, which is how single-level nesting is enforced.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TypeDescriptor {
    Int,
    Float,
    String,
    List(Primitive),
    Map { key: Primitive, value: Primitive },
}

impl TypeDescriptor {
    /// Resolve a type token.
    pub fn parse(token: &str) -> Result<Self, TypeError> {
        if let Some(inner) = strip_generic(token, "list")? {
            let elem = parse_argument(token, inner)?;

            return Ok(Self::List(elem));
        }

        if let Some(inner) = strip_generic(token, "map")? {
            let Some((key, value)) = inner.split_once(',') else {
                return Err(TypeError::malformed(token, "map needs a key and a value type"));
            };
            let key = parse_argument(token, key)?;
            if !key.is_key_type() {
                return Err(TypeError::MapKey {
                    token: token.to_string(),
                    key,
                });
            }
            let value = parse_argument(token, value)?;

            return Ok(Self::Map { key, value });
        }

        if token.contains(['<', '>', ',']) {
            return Err(TypeError::malformed(token, "unexpected '<', '>' or ','"));
        }

        Primitive::from_token(token)
            .map(Self::from)
            .ok_or_else(|| TypeError::UnknownPrimitive {
                token: token.to_string(),
                name: token.to_string(),
            })
    }

    /// The primitive for scalar descriptors.
    #[must_use]
    pub const fn primitive(self) -> Option<Primitive> {
        match self {
            Self::Int => Some(Primitive::Int),
            Self::Float => Some(Primitive::Float),
            Self::String => Some(Primitive::String),
            Self::List(_) | Self::Map { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List(_) | Self::Map { .. })
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Float => Self::Float,
            Primitive::Int => Self::Int,
            Primitive::String => Self::String,
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Map { key, value } => write!(f, "map<{key},{value}>"),
        }
    }
}

// strip_generic
// returns the text between the angle brackets of `head<...>`
fn strip_generic<'a>(token: &'a str, head: &str) -> Result<Option<&'a str>, TypeError> {
    let Some(rest) = token
        .strip_prefix(head)
        .and_then(|rest| rest.strip_prefix('<'))
    else {
        return Ok(None);
    };
    let Some(inner) = rest.strip_suffix('>') else {
        return Err(TypeError::malformed(token, "missing closing '>'"));
    };

    Ok(Some(inner))
}

fn parse_argument(token: &str, arg: &str) -> Result<Primitive, TypeError> {
    if arg.contains(['<', '>']) {
        return Err(TypeError::Nested {
            token: token.to_string(),
        });
    }
    if arg.is_empty() {
        return Err(TypeError::malformed(token, "empty type argument"));
    }
    if arg.contains(',') {
        return Err(TypeError::malformed(token, "too many type arguments"));
    }

    Primitive::from_token(arg).ok_or_else(|| TypeError::UnknownPrimitive {
        token: token.to_string(),
        name: arg.to_string(),
    })
}

/// Parse an `int` cell. Integral spreadsheet numbers such as `7.0` are
/// accepted because numeric cells are often stored as floats.
#[must_use]
pub fn parse_int(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }

    let float = text.parse::<f64>().ok()?;
    if float.fract() != 0.0 || !float.is_finite() {
        return None;
    }
    if float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    Some(float as i32)
}

/// Parse a `float` cell; only finite values are accepted.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

///
/// TESTS
///
