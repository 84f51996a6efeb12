use super::NamingError;
use std::{collections::BTreeMap, fmt};

///
/// Namespace
///
/// Tables share one namespace for the whole run; every table owns a field
/// namespace and every enum a member namespace. `Types` and `Files` hold
/// the emitted type idents and file stems, which all sheets share.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Namespace {
    Tables,
    Enums,
    Types,
    Files,
    Fields(String),
    Members(String),
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables => write!(f, "table"),
            Self::Enums => write!(f, "enum"),
            Self::Types => write!(f, "generated type"),
            Self::Files => write!(f, "generated file"),
            Self::Fields(table) => write!(f, "field of '{table}'"),
            Self::Members(owner) => write!(f, "member of '{owner}'"),
        }
    }
}

///
/// NameRegistry
///
/// Run-scoped registry of used identifiers. The first registration of a
/// name wins and records its owner; later ones fail.
///

#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    scopes: BTreeMap<Namespace, BTreeMap<String, String>>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        namespace: Namespace,
        name: &str,
        owner: impl Into<String>,
    ) -> Result<(), NamingError> {
        let scope = self.scopes.entry(namespace.clone()).or_default();

        if let Some(first) = scope.get(name) {
            return Err(NamingError::Duplicate {
                scope: namespace.to_string(),
                name: name.to_string(),
                first: first.clone(),
            });
        }
        scope.insert(name.to_string(), owner.into());

        Ok(())
    }

    /// Claim `name` before any sheet registers; an existing owner is kept.
    pub fn reserve(&mut self, namespace: Namespace, name: &str, owner: impl Into<String>) {
        self.scopes
            .entry(namespace)
            .or_default()
            .entry(name.to_string())
            .or_insert_with(|| owner.into());
    }

    #[must_use]
    pub fn contains(&self, namespace: &Namespace, name: &str) -> bool {
        self.owner(namespace, name).is_some()
    }

    /// Who registered `name` first.
    #[must_use]
    pub fn owner(&self, namespace: &Namespace, name: &str) -> Option<&str> {
        self.scopes
            .get(namespace)
            .and_then(|scope| scope.get(name))
            .map(String::as_str)
    }

    /// Registered names of one namespace, sorted.
    pub fn names(&self, namespace: &Namespace) -> impl Iterator<Item = &str> {
        self.scopes
            .get(namespace)
            .into_iter()
            .flat_map(|scope| scope.keys().map(String::as_str))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_registration_reports_first_owner() {
        let mut reg = NameRegistry::new();
        reg.register(Namespace::Tables, "Item", "Items.xlsx [Item]")
            .unwrap();

        let err = reg
            .register(Namespace::Tables, "Item", "Loot.xlsx [Item]")
            .unwrap_err();

        assert_eq!(
            err,
            NamingError::Duplicate {
                scope: "table".to_string(),
                name: "Item".to_string(),
                first: "Items.xlsx [Item]".to_string(),
            }
        );
        assert_eq!(reg.owner(&Namespace::Tables, "Item"), Some("Items.xlsx [Item]"));
    }

    #[test]
    fn namespaces_are_independent() {
        let mut reg = NameRegistry::new();
        reg.register(Namespace::Tables, "id", "a").unwrap();
        reg.register(Namespace::Fields("Item".into()), "id", "b").unwrap();
        reg.register(Namespace::Fields("Skill".into()), "id", "c").unwrap();

        assert!(reg.contains(&Namespace::Fields("Skill".into()), "id"));
        assert_eq!(reg.names(&Namespace::Enums).count(), 0);
    }

    #[test]
    fn reserved_names_reject_later_claims() {
        let mut reg = NameRegistry::new();
        reg.reserve(Namespace::Files, "manifest", "the manifest");

        let err = reg
            .register(Namespace::Files, "manifest", "Enums.xlsx [Enum-Manifest]")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate generated file 'manifest' (already defined by the manifest)"
        );
    }
}
