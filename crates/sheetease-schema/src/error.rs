use crate::sheet::{SourceRef, column_letter};
use derive_more::Display;
use serde::Serialize;
use std::fmt;

///
/// DiagnosticKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum DiagnosticKind {
    DuplicateIdentifier,
    DuplicateKey,
    InvalidIdentifier,
    InvalidKeyField,
    KeyOutOfRange,
    MalformedHeader,
    MissingValue,
    TypeMismatch,
    UnsupportedTypeToken,
}

///
/// Location
///
/// Where a diagnostic was raised. Rows and columns are 1-based sheet
/// coordinates; columns render as spreadsheet letters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Location {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            file: None,
            sheet: None,
            row: None,
            column: None,
            field: None,
        }
    }

    /// Location pointing at a whole sheet.
    #[must_use]
    pub fn sheet(source: &SourceRef) -> Self {
        Self {
            file: source.file.clone(),
            sheet: Some(source.sheet.clone()),
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub const fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.file.is_none()
            && self.sheet.is_none()
            && self.row.is_none()
            && self.column.is_none()
            && self.field.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        match (&self.file, &self.sheet) {
            (Some(file), Some(sheet)) => parts.push(format!("{file} [{sheet}]")),
            (Some(file), None) => parts.push(file.clone()),
            (None, Some(sheet)) => parts.push(format!("[{sheet}]")),
            (None, None) => {}
        }
        if let Some(row) = self.row {
            parts.push(format!("row {row}"));
        }
        if let Some(column) = self.column {
            parts.push(format!("column {}", column_letter(column)));
        }
        if let Some(field) = &self.field {
            parts.push(format!("field '{field}'"));
        }

        write!(f, "{}", parts.join(", "))
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "{}: {} ({})", self.kind, self.message, self.location)
        }
    }
}

impl std::error::Error for Diagnostic {}

///
/// Diagnostics
///
/// Ordered collection of diagnostics. Validation keeps going after the
/// first failure, so every stage pushes into one of these and converts it
/// with [`Diagnostics::result`] at the end.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn add(&mut self, kind: DiagnosticKind, location: Location, message: impl Into<String>) {
        self.push(Diagnostic::new(kind, location, message));
    }

    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics of one kind.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// `Ok(())` when empty, otherwise the collected diagnostics.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            items: vec![diagnostic],
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

// diag
// push a formatted diagnostic of the given kind
#[macro_export]
macro_rules! diag {
    ($diags:expr, $kind:ident, $location:expr, $($arg:tt)*) => {
        $diags.add(
            $crate::error::DiagnosticKind::$kind,
            $location,
            format!($($arg)*),
        )
    };
}

///
/// TESTS
///
