//! Row encoder: raw cells to typed values and keys.

mod cell;

use crate::{
    key::{EncodedKey, EnumDomain},
    record::{EncodedTable, RowRecord},
    value::Value,
};
use sheetease_runtime::combine_key;
use sheetease_schema::{
    diag,
    error::{DiagnosticKind, Diagnostics, Location},
    naming::NamingPolicy,
    node::{FieldDef, KeyKind, TableSchema},
    sheet::RowDraft,
};
use std::collections::HashMap;
use tracing::debug;

/// Encode every row of a validated table.
///
/// Rows are kept in sheet order. Any cell or key failure fails the whole
/// table, but every row is still checked so all problems are reported.
pub fn encode_table(
    schema: &TableSchema,
    rows: &[RowDraft],
    policy: &NamingPolicy,
) -> Result<EncodedTable, Diagnostics> {
    let mut errs = Diagnostics::new();
    let sheet = Location::sheet(&schema.source);
    let field_loc = |field: &FieldDef| {
        sheet
            .clone()
            .at_column(field.source_column)
            .with_field(&field.source_name)
    };

    // Phase 1: column defaults must parse before any row uses them.
    let mut defaults = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let default = match &field.default {
            Some(text) => match cell::parse_value(field.ty, text) {
                Ok(value) => Some(value),
                Err(msg) => {
                    diag!(errs, TypeMismatch, field_loc(field), "default value: {msg}");
                    None
                }
            },
            None => None,
        };
        defaults.push(default);
    }
    if !errs.is_empty() {
        return Err(errs);
    }

    // Phase 2: rows.
    let key_columns = key_columns(schema.key);
    let mut domain = schema.is_string_keyed().then(EnumDomain::new);
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let before = errs.len();
        let mut values = Vec::with_capacity(schema.fields.len());

        for (i, (field, raw)) in schema.fields.iter().zip(&row.cells).enumerate() {
            let loc = || field_loc(field).at_row(row.line);
            let is_key = key_columns.contains(&i);

            if raw.trim().is_empty() {
                if is_key {
                    diag!(errs, MissingValue, loc(), "key cell is empty");
                } else if let Some(default) = &defaults[i] {
                    values.push(default.clone());
                } else if field.required {
                    diag!(errs, MissingValue, loc(), "required cell is empty");
                } else {
                    values.push(cell::zero_value(field.ty));
                }
                continue;
            }

            match cell::parse_value(field.ty, raw) {
                Ok(value) => values.push(value),
                Err(msg) => diag!(errs, TypeMismatch, loc(), "{msg}"),
            }
        }

        if errs.len() > before {
            continue;
        }

        let key = match encode_key(schema, row, &values, domain.as_mut(), policy) {
            Ok(key) => key,
            Err((kind, message)) => {
                let field = schema.key_field();
                errs.add(kind, field_loc(field).at_row(row.line), message);
                continue;
            }
        };

        records.push(RowRecord {
            line: row.line,
            key,
            values,
        });
    }

    // Phase 3: key uniqueness, reported on the later row.
    let mut first_seen: HashMap<i32, usize> = HashMap::new();
    for record in &records {
        if let Some(first) = first_seen.insert(record.key.value(), record.line) {
            diag!(
                errs,
                DuplicateKey,
                field_loc(schema.key_field()).at_row(record.line),
                "key {} already used on row {first}",
                record.key
            );
            first_seen.insert(record.key.value(), first);
        }
    }

    if !errs.is_empty() {
        return Err(errs);
    }
    debug!(table = %schema.ident, rows = records.len(), "encoded table");

    Ok(EncodedTable {
        schema: schema.clone(),
        rows: records,
        domain,
    })
}

// key_columns
// field indexes whose cells are never defaulted
fn key_columns(kind: KeyKind) -> Vec<usize> {
    match kind {
        KeyKind::IntKey | KeyKind::StringKey => vec![0],
        KeyKind::CompositeIntKey { second } => vec![0, second],
    }
}

fn encode_key(
    schema: &TableSchema,
    row: &RowDraft,
    values: &[Value],
    domain: Option<&mut EnumDomain>,
    policy: &NamingPolicy,
) -> Result<EncodedKey, (DiagnosticKind, String)> {
    let int_at = |i: usize| {
        values
            .get(i)
            .and_then(Value::as_int)
            .ok_or_else(|| (DiagnosticKind::TypeMismatch, "key is not an int".to_string()))
    };

    match schema.key {
        KeyKind::IntKey => int_at(0).map(EncodedKey::Int),

        KeyKind::CompositeIntKey { second } => {
            let (key1, key2) = (int_at(0)?, int_at(second)?);
            let key = combine_key(key1, key2)
                .map_err(|e| (DiagnosticKind::KeyOutOfRange, e.to_string()))?;

            Ok(EncodedKey::Composite { key, key1, key2 })
        }

        KeyKind::StringKey => {
            let raw = row.cells.first().map_or("", String::as_str);
            let name = policy
                .enum_member(raw)
                .map_err(|e| (e.kind(), format!("string key: {e}")))?;
            let ordinal = domain.map_or(0, |domain| domain.intern(&name));

            Ok(EncodedKey::Ordinal { ordinal, name })
        }
    }
}

///
/// TESTS
///
