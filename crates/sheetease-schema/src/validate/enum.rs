use super::{claim_generated, owns, register};
use crate::{
    diag,
    error::{Diagnostics, Location},
    naming::{NameRegistry, Namespace, NamingPolicy},
    node::{EnumMember, EnumSchema},
    sheet::EnumDraft,
    types::parse_int,
};
use std::collections::BTreeMap;

/// Validate an enum sheet and claim its names.
pub fn validate_enum(
    draft: &EnumDraft,
    registry: &mut NameRegistry,
    policy: &NamingPolicy,
) -> Result<EnumSchema, Diagnostics> {
    let mut errs = Diagnostics::new();
    let sheet = Location::sheet(&draft.source);
    let owner = draft.source.to_string();

    let ident = register(
        &mut errs,
        registry,
        Namespace::Enums,
        policy.table_name(&draft.name),
        &owner,
        sheet.clone(),
    );
    let claimed = owns(registry, &Namespace::Enums, ident.as_deref(), &owner);
    if let Some(ident) = ident.as_ref().filter(|_| claimed) {
        claim_generated(&mut errs, registry, &[ident.clone()], &owner, &sheet);
    }
    let scope = match &ident {
        Some(ident) if claimed => ident.clone(),
        _ => owner.clone(),
    };

    if draft.members.is_empty() {
        diag!(errs, MalformedHeader, sheet.clone(), "enum sheet has no members");
    }

    let mut values: BTreeMap<i32, usize> = BTreeMap::new();
    let mut members = Vec::new();

    for member in &draft.members {
        let row = sheet.clone().at_row(member.line);

        let name = register(
            &mut errs,
            registry,
            Namespace::Members(scope.clone()),
            policy.enum_member(&member.name),
            &format!("{owner} row {}", member.line),
            row.clone().at_column(1).with_field(&member.name),
        );

        let value = parse_int(&member.value);
        match value {
            None => diag!(
                errs,
                TypeMismatch,
                row.clone().at_column(2).with_field(&member.name),
                "enum value '{}' is not an int",
                member.value
            ),
            Some(value) => {
                if let Some(first) = values.insert(value, member.line) {
                    diag!(
                        errs,
                        DuplicateKey,
                        row.clone().at_column(2).with_field(&member.name),
                        "enum value {value} already used on row {first}"
                    );
                }
            }
        }

        if let (Some(ident), Some(value)) = (name, value) {
            members.push(EnumMember {
                ident,
                value,
                description: member.description.clone(),
            });
        }
    }

    // a rejected or missing name already pushed a diagnostic
    let Some(ident) = ident.filter(|_| claimed) else {
        return Err(errs);
    };
    if !errs.is_empty() {
        return Err(errs);
    }

    Ok(EnumSchema {
        ident,
        source: draft.source.clone(),
        members,
    })
}

///
/// TESTS
///
