//! Identifier sanitizing, casing policy and the run-wide name registry.

mod registry;
mod reserved;

pub use registry::{NameRegistry, Namespace};
pub use reserved::{is_keyword, is_unusable};

use crate::{MAX_IDENT_LEN, error::DiagnosticKind};
use convert_case::{Case, Casing};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// NamingError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NamingError {
    #[error("'{text}' is not a valid identifier: {reason}")]
    Invalid { text: String, reason: &'static str },

    #[error("duplicate {scope} '{name}' (already defined by {first})")]
    Duplicate {
        scope: String,
        name: String,
        first: String,
    },
}

impl NamingError {
    fn invalid(text: &str, reason: &'static str) -> Self {
        Self::Invalid {
            text: text.to_string(),
            reason,
        }
    }

    /// Diagnostic kind this error is reported as.
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        match self {
            Self::Invalid { .. } => DiagnosticKind::InvalidIdentifier,
            Self::Duplicate { .. } => DiagnosticKind::DuplicateIdentifier,
        }
    }
}

///
/// IdentCase
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum IdentCase {
    #[default]
    Passthrough,
    Pascal,
    Snake,
}

impl IdentCase {
    #[must_use]
    pub fn apply(self, ident: &str) -> String {
        match self {
            Self::Passthrough => ident.to_string(),
            Self::Pascal => to_pascal(ident),
            Self::Snake => to_snake(ident),
        }
    }
}

///
/// NamingPolicy
///
/// Casing applied on top of sanitizing. Table and enum-member names
/// become PascalCase type/variant names; field names stay as authored.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NamingPolicy {
    pub table_name_case: IdentCase,
    pub field_name_case: IdentCase,
    pub enum_member_case: IdentCase,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            table_name_case: IdentCase::Pascal,
            field_name_case: IdentCase::Passthrough,
            enum_member_case: IdentCase::Pascal,
        }
    }
}

impl NamingPolicy {
    pub fn table_name(&self, text: &str) -> Result<String, NamingError> {
        identifier(text, self.table_name_case)
    }

    pub fn field_name(&self, text: &str) -> Result<String, NamingError> {
        identifier(text, self.field_name_case)
    }

    pub fn enum_member(&self, text: &str) -> Result<String, NamingError> {
        identifier(text, self.enum_member_case)
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(text: &str) -> Result<String, NamingError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NamingError::invalid(text, "empty after sanitizing"));
    }

    let ident: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    check(text, &ident)?;

    Ok(ident)
}

/// Sanitize, apply a casing transform and re-check the result.
pub fn identifier(text: &str, case: IdentCase) -> Result<String, NamingError> {
    let ident = case.apply(&sanitize(text)?);
    check(text, &ident)?;

    Ok(ident)
}

/// Upper-case the first letter of every `_`-separated segment, keeping the
/// rest of each segment as written.
#[must_use]
pub fn to_pascal(ident: &str) -> String {
    ident
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

/// snake_case form used for generated file and parameter names.
#[must_use]
pub fn to_snake(ident: &str) -> String {
    ident.to_case(Case::Snake)
}

fn check(text: &str, ident: &str) -> Result<(), NamingError> {
    if ident.is_empty() {
        return Err(NamingError::invalid(text, "empty after sanitizing"));
    }
    if ident.chars().all(|c| c == '_') {
        return Err(NamingError::invalid(text, "no usable characters"));
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(NamingError::invalid(text, "starts with a digit"));
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(NamingError::invalid(text, "longer than 64 characters"));
    }
    if is_unusable(ident) {
        return Err(NamingError::invalid(text, "reserved word"));
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_foreign_characters() {
        assert_eq!(sanitize("max hp").as_deref(), Ok("max_hp"));
        assert_eq!(sanitize(" drop-rate% ").as_deref(), Ok("drop_rate_"));
        assert_eq!(sanitize("_private").as_deref(), Ok("_private"));
    }

    #[test]
    fn sanitize_rejects_empty_and_leading_digits() {
        for text in ["", "   ", "2fast", "名字", "_", "self"] {
            assert!(
                matches!(sanitize(text), Err(NamingError::Invalid { .. })),
                "'{text}' should be rejected"
            );
        }
    }

    #[test]
    fn policy_cases_tables_and_members_only() {
        let policy = NamingPolicy::default();

        assert_eq!(policy.table_name("item_data").as_deref(), Ok("ItemData"));
        assert_eq!(policy.table_name("Skill Tree").as_deref(), Ok("SkillTree"));
        assert_eq!(policy.field_name("maxHp").as_deref(), Ok("maxHp"));
        assert_eq!(policy.enum_member("fire_sword").as_deref(), Ok("FireSword"));
        assert_eq!(policy.enum_member("ICE").as_deref(), Ok("ICE"));
    }

    #[test]
    fn casing_result_is_checked_again() {
        let policy = NamingPolicy::default();

        assert!(policy.enum_member("_1st").is_err());
        assert!(policy.table_name("self").is_err());
    }

    #[test]
    fn keywords_are_allowed_as_raw_identifiers() {
        assert_eq!(sanitize("type").as_deref(), Ok("type"));
        assert!(is_keyword("type"));
        assert!(!is_keyword("kind"));
    }

    #[test]
    fn errors_map_to_diagnostic_kinds() {
        let err = sanitize("").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::InvalidIdentifier);
    }
}
