//! Structural and naming rules that turn drafts into schemas.
//!
//! Validation is staged: types are resolved first, then identifiers are
//! registered, then the key discipline is derived, and last the emitted
//! type idents and file stems are claimed in the run-wide generated-code
//! namespace. Every stage keeps going after a failure so one run reports as
//! much as possible.

mod r#enum;
mod key;
mod table;

pub use self::r#enum::validate_enum;
pub use self::table::validate_table;

use crate::{
    error::{Diagnostics, Location},
    naming::{NameRegistry, Namespace, NamingError, to_snake},
};

/// File stem of the generated manifest, reserved before any sheet.
pub const MANIFEST_STEM: &str = "manifest";

// register
// claim a sanitized identifier in `namespace`; the identifier is returned
// even when the claim fails so later stages can keep checking
fn register(
    errs: &mut Diagnostics,
    registry: &mut NameRegistry,
    namespace: Namespace,
    ident: Result<String, NamingError>,
    owner: &str,
    location: Location,
) -> Option<String> {
    let ident = match ident {
        Ok(ident) => ident,
        Err(e) => {
            errs.add(e.kind(), location, e.to_string());
            return None;
        }
    };

    if let Err(e) = registry.register(namespace, &ident, owner) {
        errs.add(e.kind(), location, e.to_string());
    }

    Some(ident)
}

// owns
// true when `owner` holds `ident` in `namespace`; a rejected duplicate
// belongs to the earlier sheet
fn owns(
    registry: &NameRegistry,
    namespace: &Namespace,
    ident: Option<&str>,
    owner: &str,
) -> bool {
    ident.is_some_and(|ident| registry.owner(namespace, ident) == Some(owner))
}

// claim_generated
// register emitted type idents and the snake-case file stem of each one;
// every sheet writes into the same generated-code namespace; a type that
// collides is reported once, not again for its file
fn claim_generated(
    errs: &mut Diagnostics,
    registry: &mut NameRegistry,
    types: &[String],
    owner: &str,
    location: &Location,
) {
    for ty in types {
        let claimed = registry
            .register(Namespace::Types, ty, owner)
            .and_then(|()| registry.register(Namespace::Files, &to_snake(ty), owner));

        if let Err(e) = claimed {
            errs.add(e.kind(), location.clone(), e.to_string());
        }
    }
}
