//! JSON data artifact.
//!
//! The artifact is one object keyed by the decimal row key; each row is an
//! object keyed by the authored field names in declared order. Insertion
//! order is preserved, so output is byte-stable for a given sheet.

use crate::record::EncodedTable;
use serde_json::{Map, Value as Json};

/// Build the artifact as a JSON value.
#[must_use]
pub fn to_json(table: &EncodedTable) -> Json {
    let mut root = Map::with_capacity(table.rows.len());

    for row in &table.rows {
        let mut object = Map::with_capacity(row.values.len());
        for (field, value) in table.schema.fields.iter().zip(&row.values) {
            // Value serialization is infallible: keys are strings and
            // floats are finite.
            let value = serde_json::to_value(value).unwrap_or(Json::Null);
            object.insert(field.source_name.clone(), value);
        }
        root.insert(row.key.value().to_string(), Json::Object(object));
    }

    Json::Object(root)
}

/// Artifact bytes, pretty-printed or compact, with a trailing newline.
pub fn render(table: &EncodedTable, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
    let json = to_json(table);
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(&json)?
    } else {
        serde_json::to_vec(&json)?
    };
    bytes.push(b'\n');

    Ok(bytes)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::EncodedKey,
        record::RowRecord,
        value::{MapKey, Value},
    };
    use sheetease_schema::{
        node::{FieldDef, KeyKind, TableSchema},
        sheet::SourceRef,
        types::{Primitive, TypeDescriptor},
    };

    fn field(ident: &str, source_name: &str, ty: TypeDescriptor) -> FieldDef {
        FieldDef {
            ident: ident.to_string(),
            source_name: source_name.to_string(),
            ty,
            description: None,
            default: None,
            required: false,
            source_column: 1,
        }
    }

    fn table() -> EncodedTable {
        let schema = TableSchema {
            ident: "Weapon".to_string(),
            source: SourceRef::new(None, "Weapon"),
            fields: vec![
                field("id", "id", TypeDescriptor::Int),
                field("max_hp", "max hp", TypeDescriptor::Float),
                field("tags", "tags", TypeDescriptor::List(Primitive::Int)),
                field(
                    "stats",
                    "stats",
                    TypeDescriptor::Map {
                        key: Primitive::Int,
                        value: Primitive::String,
                    },
                ),
            ],
            key: KeyKind::IntKey,
        };
        let row = |id: i32, tags: Vec<Value>| RowRecord {
            line: 4,
            key: EncodedKey::Int(id),
            values: vec![
                Value::Int(id),
                Value::Float(1.5),
                Value::List(tags),
                Value::Map(vec![(MapKey::Int(7), Value::String("x".into()))]),
            ],
        };

        EncodedTable {
            schema,
            rows: vec![row(10, vec![Value::Int(1)]), row(2, Vec::new())],
            domain: None,
        }
    }

    #[test]
    fn rows_keep_sheet_order_and_authored_names() {
        let json = to_json(&table());
        let root = json.as_object().unwrap();

        assert_eq!(root.keys().collect::<Vec<_>>(), ["10", "2"]);
        let row = root["10"].as_object().unwrap();
        assert_eq!(
            row.keys().collect::<Vec<_>>(),
            ["id", "max hp", "tags", "stats"]
        );
        assert_eq!(row["stats"]["7"], "x");
        assert_eq!(row["tags"][0], 1);
    }

    #[test]
    fn compact_output_is_one_line() {
        let bytes = render(&table(), false).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(r#"{"10":{"id":10,"max hp":1.5,"#));
        assert_eq!(text.lines().count(), 1);
        assert!(render(&table(), true).unwrap().len() > text.len());
    }
}
