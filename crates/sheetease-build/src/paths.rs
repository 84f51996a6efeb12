use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, quote};
use syn::Path;
use thiserror::Error as ThisError;

/// Environment variable that overrides the runtime crate path.
pub const RUNTIME_CRATE_ENV: &str = "SHEETEASE_RUNTIME_CRATE";

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{0}' is not a valid Rust path")]
pub struct PathError(pub String);

///
/// RuntimePath
///
/// Path generated code uses to reach `sheetease_runtime`. Generated files
/// are `include!`d, so the path is absolute unless it starts at `crate`.
/// Kept as plain strings so options can be shared between threads.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimePath {
    from_crate: bool,
    segments: Vec<String>,
}

impl RuntimePath {
    /// Parse a crate path such as `sheetease_runtime`, `::game::runtime`
    /// or `crate::runtime`.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let invalid = || PathError(text.trim().to_string());
        let path: Path = syn::parse_str(text.trim()).map_err(|_| invalid())?;

        let mut segments = Vec::with_capacity(path.segments.len());
        for segment in &path.segments {
            if !segment.arguments.is_none() {
                return Err(invalid());
            }
            segments.push(segment.ident.to_string());
        }

        let from_crate =
            path.leading_colon.is_none() && segments.first().is_some_and(|s| s == "crate");
        let skip = usize::from(from_crate);
        if segments
            .iter()
            .skip(skip)
            .any(|s| matches!(s.as_str(), "crate" | "self" | "super" | "Self") || s.starts_with("r#"))
        {
            return Err(invalid());
        }

        Ok(Self {
            from_crate,
            segments,
        })
    }

    /// The configured path, unless the environment overrides it.
    pub fn resolve(configured: &str) -> Result<Self, PathError> {
        match std::env::var(RUNTIME_CRATE_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value),
            _ => Self::parse(configured),
        }
    }

    /// Path of the serde re-export, as `#[serde(crate = "..")]` expects it.
    #[must_use]
    pub fn serde_crate(&self) -> String {
        format!("{self}::__reexports::serde")
    }
}

impl Default for RuntimePath {
    fn default() -> Self {
        Self {
            from_crate: false,
            segments: vec!["sheetease_runtime".to_string()],
        }
    }
}

impl std::fmt::Display for RuntimePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.from_crate {
            write!(f, "::")?;
        }
        write!(f, "{}", self.segments.join("::"))
    }
}

impl ToTokens for RuntimePath {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let mut segments = self
            .segments
            .iter()
            .map(|s| Ident::new(s, Span::call_site()));

        if self.from_crate {
            if let Some(first) = segments.next() {
                tokens.extend(quote!(#first));
            }
        }
        tokens.extend(quote!(#(:: #segments)*));
    }
}

///
/// TESTS
///
