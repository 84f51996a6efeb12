use crate::value::{MapKey, Value};
use sheetease_schema::types::{Primitive, TypeDescriptor, parse_float, parse_int};
use std::collections::HashSet;

// parse_value
// cell text to a value of `ty`; the error is the mismatch message
pub(crate) fn parse_value(ty: TypeDescriptor, raw: &str) -> Result<Value, String> {
    match ty {
        TypeDescriptor::Int => parse_scalar(Primitive::Int, raw),
        TypeDescriptor::Float => parse_scalar(Primitive::Float, raw),
        TypeDescriptor::String => parse_scalar(Primitive::String, raw),
        TypeDescriptor::List(elem) => raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| parse_scalar(elem, part))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        TypeDescriptor::Map { key, value } => parse_map(key, value, raw),
    }
}

/// Value used for an empty, optional cell without a default.
pub(crate) fn zero_value(ty: TypeDescriptor) -> Value {
    match ty {
        TypeDescriptor::Int => Value::Int(0),
        TypeDescriptor::Float => Value::Float(0.0),
        TypeDescriptor::String => Value::String(String::new()),
        TypeDescriptor::List(_) => Value::List(Vec::new()),
        TypeDescriptor::Map { .. } => Value::Map(Vec::new()),
    }
}

fn parse_scalar(prim: Primitive, raw: &str) -> Result<Value, String> {
    match prim {
        Primitive::Int => parse_int(raw)
            .map(Value::Int)
            .ok_or_else(|| format!("'{}' is not an int", raw.trim())),
        Primitive::Float => parse_float(raw)
            .map(Value::Float)
            .ok_or_else(|| format!("'{}' is not a finite float", raw.trim())),
        Primitive::String => Ok(Value::String(raw.to_string())),
    }
}

fn parse_map_key(prim: Primitive, raw: &str) -> Result<MapKey, String> {
    match parse_scalar(prim, raw)? {
        Value::Int(v) => Ok(MapKey::Int(v)),
        Value::String(s) => Ok(MapKey::String(s)),
        _ => Err(format!("'{raw}' cannot be a map key")),
    }
}

// parse_map
// "a:1;b:2" or one pair per line; each pair splits on its first ':'
fn parse_map(key: Primitive, value: Primitive, raw: &str) -> Result<Value, String> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for pair in raw
        .split([';', '\n'])
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
    {
        let Some((k, v)) = pair.split_once(':') else {
            return Err(format!("map entry '{pair}' is not 'key:value'"));
        };
        let k = parse_map_key(key, k.trim())?;
        let v = parse_scalar(value, v.trim())?;

        if !seen.insert(k.clone()) {
            return Err(format!("map key '{k}' appears more than once"));
        }
        pairs.push((k, v));
    }

    Ok(Value::Map(pairs))
}

///
/// TESTS
///
