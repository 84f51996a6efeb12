//! Worksheet loading: raw cell grids in, unvalidated drafts out.

mod draft;
mod enum_sheet;
mod layout;

pub use draft::{ColumnDraft, ColumnLabels, RowDraft, TableDraft, load_table};
pub use enum_sheet::{EnumDraft, EnumMemberDraft, load_enum};
pub use layout::{HeaderLayout, LayoutError};

use serde::Serialize;
use std::fmt;

///
/// SourceRef
///
/// Identifies the workbook file and worksheet a draft came from.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct SourceRef {
    pub file: Option<String>,
    pub sheet: String,
}

impl SourceRef {
    pub fn new(file: Option<String>, sheet: impl Into<String>) -> Self {
        Self {
            file,
            sheet: sheet.into(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file} [{}]", self.sheet),
            None => write!(f, "[{}]", self.sheet),
        }
    }
}

///
/// SheetGrid
///
/// Rectangular-ish grid of cell text for one worksheet. Rows may be
/// ragged; missing cells read as empty.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a grid from anything string-like, mostly for fixtures.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at a 1-based row and column, empty when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        if row == 0 || column == 0 {
            return "";
        }

        self.rows
            .get(row - 1)
            .and_then(|cells| cells.get(column - 1))
            .map_or("", String::as_str)
    }

    /// Width of a 1-based row.
    #[must_use]
    pub fn row_len(&self, row: usize) -> usize {
        row.checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map_or(0, Vec::len)
    }
}

/// Spreadsheet column letter for a 1-based column index (`1` → `A`, `27` → `AA`).
#[must_use]
pub fn column_letter(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.reverse();

    letters.into_iter().collect()
}

///
/// TESTS
///
