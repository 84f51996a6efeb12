use super::{claim_generated, key::key_kind, owns, register};
use crate::{
    error::{DiagnosticKind, Diagnostics, Location},
    naming::{NameRegistry, Namespace, NamingPolicy},
    node::{FieldDef, KeyKind, TableSchema},
    sheet::TableDraft,
    types::TypeDescriptor,
};

/// Validate a table draft and claim its names in the run-wide registry.
///
/// A table with any diagnostic yields `Err`; its names stay registered so
/// later sheets still collide with them.
pub fn validate_table(
    draft: &TableDraft,
    registry: &mut NameRegistry,
    policy: &NamingPolicy,
) -> Result<TableSchema, Diagnostics> {
    let mut errs = Diagnostics::new();
    let sheet = Location::sheet(&draft.source);

    // Phase 1: resolve type tokens.
    let types: Vec<Option<TypeDescriptor>> = draft
        .columns
        .iter()
        .map(|col| match TypeDescriptor::parse(&col.type_token) {
            Ok(ty) => Some(ty),
            Err(e) => {
                errs.add(
                    DiagnosticKind::UnsupportedTypeToken,
                    sheet
                        .clone()
                        .at_column(col.source_column)
                        .with_field(&col.field_name),
                    e.to_string(),
                );
                None
            }
        })
        .collect();

    // Phase 2: table and field names. Fields of a sheet whose table name
    // was rejected are scoped to the sheet itself.
    let owner = draft.source.to_string();
    let table_ident = register(
        &mut errs,
        registry,
        Namespace::Tables,
        policy.table_name(&draft.name),
        &owner,
        sheet.clone(),
    );
    let claimed = owns(registry, &Namespace::Tables, table_ident.as_deref(), &owner);
    let scope = match &table_ident {
        Some(ident) if claimed => ident.clone(),
        _ => owner.clone(),
    };

    let idents: Vec<Option<String>> = draft
        .columns
        .iter()
        .map(|col| {
            register(
                &mut errs,
                registry,
                Namespace::Fields(scope.clone()),
                policy.field_name(&col.field_name),
                &format!("{owner} column {}", col.source_column),
                sheet
                    .clone()
                    .at_column(col.source_column)
                    .with_field(&col.field_name),
            )
        })
        .collect();

    // Phase 3: key discipline.
    let key = key_kind(&mut errs, &sheet, &draft.columns, &types);

    // both arms below already pushed a diagnostic
    let Some(ident) = table_ident.filter(|_| claimed) else {
        return Err(errs);
    };
    let Some(key) = key else {
        return Err(errs);
    };

    // Phase 4: emitted type and file names.
    let mut generated = vec![format!("{ident}Info"), format!("{ident}Config")];
    if key == KeyKind::StringKey {
        generated.push(format!("{ident}Keys"));
    }
    claim_generated(&mut errs, registry, &generated, &owner, &sheet);

    if !errs.is_empty() {
        return Err(errs);
    }

    // every Option below is Some once no diagnostic was raised
    let fields = draft
        .columns
        .iter()
        .zip(types)
        .zip(idents)
        .filter_map(|((col, ty), ident)| {
            Some(FieldDef {
                ident: ident?,
                source_name: col.field_name.clone(),
                ty: ty?,
                description: col.description.clone(),
                default: col.default.clone(),
                required: col.labels.required,
                source_column: col.source_column,
            })
        })
        .collect();

    Ok(TableSchema {
        ident,
        source: draft.source.clone(),
        fields,
        key,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{ColumnDraft, ColumnLabels, SourceRef};

    fn column(token: &str, name: &str, column: usize) -> ColumnDraft {
        ColumnDraft {
            type_token: token.to_string(),
            field_name: name.to_string(),
            description: None,
            default: None,
            labels: ColumnLabels::default(),
            source_column: column,
        }
    }

    fn draft(name: &str, columns: Vec<ColumnDraft>) -> TableDraft {
        TableDraft {
            name: name.to_string(),
            source: SourceRef::new(Some("Items.xlsx".into()), name),
            columns,
            rows: Vec::new(),
        }
    }

    fn check(draft: &TableDraft) -> Result<TableSchema, Diagnostics> {
        validate_table(draft, &mut NameRegistry::new(), &NamingPolicy::default())
    }

    #[test]
    fn int_key_table_is_valid() {
        let schema = check(&draft(
            "weapon",
            vec![
                column("int", "id", 1),
                column("string", "display name", 2),
                column("map<string,float>", "stats", 3),
            ],
        ))
        .unwrap();

        assert_eq!(schema.ident, "Weapon");
        assert_eq!(schema.key, KeyKind::IntKey);
        assert_eq!(schema.fields[1].ident, "display_name");
        assert_eq!(schema.fields[1].source_name, "display name");
        assert_eq!(schema.key_field().ident, "id");
    }

    #[test]
    fn string_key_table_is_valid() {
        let schema = check(&draft(
            "Element",
            vec![column("string", "name", 1), column("int", "power", 2)],
        ))
        .unwrap();

        assert_eq!(schema.key, KeyKind::StringKey);
        assert!(schema.is_string_keyed());
    }

    #[test]
    fn bad_tokens_are_each_reported() {
        let errs = check(&draft(
            "Weapon",
            vec![
                column("int", "id", 1),
                column("bool", "flag", 2),
                column("list<list<int>>", "grid", 3),
            ],
        ))
        .unwrap_err();

        assert_eq!(errs.count(DiagnosticKind::UnsupportedTypeToken), 2);
    }

    #[test]
    fn duplicate_field_names_are_reported_once() {
        let errs = check(&draft(
            "Weapon",
            vec![
                column("int", "id", 1),
                column("string", "name", 2),
                column("string", "name", 3),
            ],
        ))
        .unwrap_err();

        assert_eq!(errs.len(), 1);
        let diag = errs.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::DuplicateIdentifier);
        assert_eq!(diag.location.column, Some(3));
    }

    #[test]
    fn sanitized_names_can_collide() {
        let errs = check(&draft(
            "Weapon",
            vec![column("int", "max-hp", 1), column("int", "max hp", 2)],
        ))
        .unwrap_err();

        assert!(errs.contains(DiagnosticKind::DuplicateIdentifier));
    }

    #[test]
    fn table_names_are_unique_across_the_run() {
        let mut registry = NameRegistry::new();
        let policy = NamingPolicy::default();

        let first = draft("Weapon", vec![column("int", "id", 1)]);
        let mut second = draft("weapon", vec![column("int", "id", 1)]);
        second.source = SourceRef::new(Some("Loot.xlsx".into()), "weapon");

        assert!(validate_table(&first, &mut registry, &policy).is_ok());
        let errs = validate_table(&second, &mut registry, &policy).unwrap_err();

        assert_eq!(errs.len(), 1);
        let diag = errs.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::DuplicateIdentifier);
        assert!(diag.message.contains("Items.xlsx [Weapon]"));
    }

    #[test]
    fn rejected_table_checks_fields_in_its_own_scope() {
        let mut registry = NameRegistry::new();
        let policy = NamingPolicy::default();
        let columns = || {
            vec![
                column("int", "id", 1),
                column("string", "name", 2),
                column("int", "atk", 3),
            ]
        };

        let first = draft("Weapon", columns());
        let mut second = draft("Weapon", columns());
        second.source = SourceRef::new(Some("Loot.xlsx".into()), "Weapon");
        second.columns.push(column("int", "atk", 4));

        assert!(validate_table(&first, &mut registry, &policy).is_ok());
        let errs = validate_table(&second, &mut registry, &policy).unwrap_err();

        // the table name, plus the sheet's own repeated column
        assert_eq!(errs.count(DiagnosticKind::DuplicateIdentifier), 2);
        assert!(errs.iter().all(|d| !d.message.contains("Items.xlsx [Weapon] column")));
        assert_eq!(errs.iter().nth(1).unwrap().location.column, Some(4));
    }

    #[test]
    fn generated_file_names_are_unique_across_the_run() {
        let mut registry = NameRegistry::new();
        let policy = NamingPolicy::default();

        let first = draft("ABTest", vec![column("int", "id", 1)]);
        let second = draft("AbTest", vec![column("int", "id", 1)]);

        assert!(validate_table(&first, &mut registry, &policy).is_ok());
        let errs = validate_table(&second, &mut registry, &policy).unwrap_err();

        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|d| d.kind == DiagnosticKind::DuplicateIdentifier));
        assert!(errs.iter().next().unwrap().message.contains("'ab_test_info'"));
        assert!(errs.iter().nth(1).unwrap().message.contains("'ab_test_config'"));
    }

    #[test]
    fn keys_enum_claims_its_type_name() {
        let mut registry = NameRegistry::new();
        let elements = draft("Element", vec![column("string", "name", 1)]);

        assert!(validate_table(&elements, &mut registry, &NamingPolicy::default()).is_ok());
        assert!(registry.contains(&Namespace::Types, "ElementKeys"));
        assert!(registry.contains(&Namespace::Files, "element_keys"));
        assert!(!registry.contains(&Namespace::Types, "WeaponKeys"));
    }

    #[test]
    fn key_label_on_first_column_is_rejected() {
        let mut id = column("int", "id", 1);
        id.labels.key = true;

        let errs = check(&draft("Weapon", vec![id, column("int", "atk", 2)])).unwrap_err();

        assert_eq!(errs.len(), 1);
        let diag = errs.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::InvalidKeyField);
        assert_eq!(diag.location.field.as_deref(), Some("id"));
    }

    #[test]
    fn table_without_columns_is_reported() {
        let errs = check(&draft("Weapon", Vec::new())).unwrap_err();

        assert!(errs.contains(DiagnosticKind::MalformedHeader));
    }

    #[test]
    fn invalid_names_are_reported() {
        let errs = check(&draft(
            "2nd",
            vec![column("int", "id", 1), column("int", "9lives", 2)],
        ))
        .unwrap_err();

        assert_eq!(errs.count(DiagnosticKind::InvalidIdentifier), 2);
    }

    #[test]
    fn float_key_is_rejected() {
        let errs = check(&draft(
            "Curve",
            vec![column("float", "x", 1), column("float", "y", 2)],
        ))
        .unwrap_err();

        assert_eq!(errs.count(DiagnosticKind::InvalidKeyField), 1);
    }

    #[test]
    fn composite_key_needs_two_int_fields() {
        let mut partner = column("int", "level", 2);
        partner.labels.key = true;
        let schema = check(&draft(
            "SkillLevel",
            vec![column("int", "skill", 1), partner.clone(), column("int", "cost", 3)],
        ))
        .unwrap();

        assert_eq!(schema.key, KeyKind::CompositeIntKey { second: 1 });
        assert_eq!(schema.second_key_field().unwrap().ident, "level");

        let errs = check(&draft(
            "SkillLevel",
            vec![column("string", "skill", 1), partner],
        ))
        .unwrap_err();
        assert_eq!(errs.count(DiagnosticKind::InvalidKeyField), 1);
    }

    #[test]
    fn second_partner_is_rejected() {
        let mut a = column("int", "a", 2);
        a.labels.key = true;
        let mut b = column("int", "b", 3);
        b.labels.key = true;

        let errs = check(&draft("Grid", vec![column("int", "id", 1), a, b])).unwrap_err();

        let diag = errs.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::InvalidKeyField);
        assert_eq!(diag.location.field.as_deref(), Some("b"));
    }

    #[test]
    fn field_metadata_is_carried_over() {
        let mut col = column("float", "crit", 2);
        col.description = Some("Crit chance".into());
        col.default = Some("0.5".into());
        col.labels.required = true;

        let schema = check(&draft("Weapon", vec![column("int", "id", 1), col])).unwrap();
        let field = schema.field("crit").unwrap();

        assert_eq!(field.ty, TypeDescriptor::Float);
        assert_eq!(field.description.as_deref(), Some("Crit chance"));
        assert_eq!(field.default.as_deref(), Some("0.5"));
        assert!(field.required);
        assert_eq!(field.source_column, 2);
    }
}
