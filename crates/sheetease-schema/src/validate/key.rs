use crate::{
    diag,
    error::{Diagnostics, Location},
    node::KeyKind,
    sheet::ColumnDraft,
    types::TypeDescriptor,
};

// key_kind
// derive the key discipline from the first column and any `key` partner;
// `types` is aligned with `columns` and holds None for unresolved tokens
pub(super) fn key_kind(
    errs: &mut Diagnostics,
    sheet: &Location,
    columns: &[ColumnDraft],
    types: &[Option<TypeDescriptor>],
) -> Option<KeyKind> {
    let (Some(first), Some(first_ty)) = (columns.first(), types.first()) else {
        diag!(errs, MalformedHeader, sheet.clone(), "table has no key column");
        return None;
    };
    let first_loc = || {
        sheet
            .clone()
            .at_column(first.source_column)
            .with_field(&first.field_name)
    };

    // the first column is the key already; `key` only marks a partner
    if first.labels.key {
        diag!(
            errs,
            InvalidKeyField,
            first_loc(),
            "'key' label on the first column '{}': only a composite key partner takes it",
            first.field_name
        );
    }

    let partners: Vec<usize> = columns
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, col)| col.labels.key)
        .map(|(i, _)| i)
        .collect();

    if let [_, extra @ ..] = partners.as_slice() {
        for &i in extra {
            let col = &columns[i];
            diag!(
                errs,
                InvalidKeyField,
                sheet
                    .clone()
                    .at_column(col.source_column)
                    .with_field(&col.field_name),
                "a table can have only one composite key partner, '{}' is the second",
                col.field_name
            );
        }
    }

    match (partners.first(), *first_ty) {
        (_, None) => None,

        (None, Some(TypeDescriptor::Int)) => Some(KeyKind::IntKey),
        (None, Some(TypeDescriptor::String)) => Some(KeyKind::StringKey),
        (None, Some(ty)) => {
            diag!(
                errs,
                InvalidKeyField,
                first_loc(),
                "key field '{}' has type '{ty}', expected int or string",
                first.field_name
            );
            None
        }

        (Some(&second), Some(ty)) => {
            let mut ok = true;
            if ty != TypeDescriptor::Int {
                diag!(
                    errs,
                    InvalidKeyField,
                    first_loc(),
                    "composite key field '{}' has type '{ty}', expected int",
                    first.field_name
                );
                ok = false;
            }

            let partner = &columns[second];
            match types[second] {
                Some(TypeDescriptor::Int) | None => {}
                Some(other) => {
                    diag!(
                        errs,
                        InvalidKeyField,
                        sheet
                            .clone()
                            .at_column(partner.source_column)
                            .with_field(&partner.field_name),
                        "composite key partner '{}' has type '{other}', expected int",
                        partner.field_name
                    );
                    ok = false;
                }
            }

            ok.then_some(KeyKind::CompositeIntKey { second })
        }
    }
}
