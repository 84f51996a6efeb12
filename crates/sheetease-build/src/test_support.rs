use sheetease_core::{EncodedKey, EncodedTable, EnumDomain, RowRecord, Value};
use sheetease_schema::{
    node::{FieldDef, KeyKind, TableSchema},
    sheet::SourceRef,
    types::{Primitive, TypeDescriptor},
};

/// Token output with all whitespace removed, for layout-independent asserts.
pub fn squash(code: &str) -> String {
    code.split_whitespace().collect()
}

fn field(ident: &str, source_name: &str, ty: TypeDescriptor, column: usize) -> FieldDef {
    FieldDef {
        ident: ident.to_string(),
        source_name: source_name.to_string(),
        ty,
        description: None,
        default: None,
        required: false,
        source_column: column,
    }
}

fn table(ident: &str, key: KeyKind, fields: Vec<FieldDef>) -> TableSchema {
    TableSchema {
        ident: ident.to_string(),
        source: SourceRef::new(Some("Items.xlsx".into()), ident),
        fields,
        key,
    }
}

pub fn weapon_table() -> EncodedTable {
    let mut hp = field("max_hp", "max hp", TypeDescriptor::Float, 3);
    hp.description = Some("Hit points".to_string());

    EncodedTable {
        schema: table(
            "Weapon",
            KeyKind::IntKey,
            vec![
                field("id", "id", TypeDescriptor::Int, 1),
                field("type", "type", TypeDescriptor::String, 2),
                hp,
                field("tags", "tags", TypeDescriptor::List(Primitive::Int), 4),
            ],
        ),
        rows: Vec::new(),
        domain: None,
    }
}

pub fn skill_level_table() -> EncodedTable {
    EncodedTable {
        schema: table(
            "SkillLevel",
            KeyKind::CompositeIntKey { second: 1 },
            vec![
                field("skill", "skill", TypeDescriptor::Int, 1),
                field("level", "level", TypeDescriptor::Int, 2),
                field("cost", "cost", TypeDescriptor::Int, 3),
            ],
        ),
        rows: Vec::new(),
        domain: None,
    }
}

pub fn element_table() -> EncodedTable {
    let mut domain = EnumDomain::new();
    let rows = ["Water", "Fire", "Earth"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| RowRecord {
            line: i + 4,
            key: EncodedKey::Ordinal {
                ordinal: domain.intern(name),
                name: name.to_string(),
            },
            values: vec![Value::String(name.to_string())],
        })
        .collect();

    EncodedTable {
        schema: table(
            "Element",
            KeyKind::StringKey,
            vec![field("name", "name", TypeDescriptor::String, 1)],
        ),
        rows,
        domain: Some(domain),
    }
}
