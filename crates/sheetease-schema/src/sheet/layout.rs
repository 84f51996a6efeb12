use serde::Serialize;
use thiserror::Error as ThisError;

///
/// LayoutError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid header layout: {0}")]
pub struct LayoutError(pub String);

///
/// HeaderLayout
///
/// Which sheet rows hold the meta-header. All numbers are 1-based
/// spreadsheet rows/columns; everything from `data_row` down is data.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HeaderLayout {
    pub type_row: usize,
    pub name_row: usize,
    pub description_row: Option<usize>,
    pub remark_row: Option<usize>,
    pub label_row: Option<usize>,
    pub default_row: Option<usize>,
    pub data_row: usize,
    pub first_column: usize,
}

impl HeaderLayout {
    /// Type tokens, field names, descriptions; data from row 4.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            type_row: 1,
            name_row: 2,
            description_row: Some(3),
            remark_row: None,
            label_row: None,
            default_row: None,
            data_row: 4,
            first_column: 1,
        }
    }

    /// Six-row header: remarks, display headers, types, labels, field
    /// names, defaults. Column A is a designer comment column.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            type_row: 3,
            name_row: 5,
            description_row: Some(2),
            remark_row: Some(1),
            label_row: Some(4),
            default_row: Some(6),
            data_row: 7,
            first_column: 2,
        }
    }

    /// Named preset lookup.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "compact" => Some(Self::compact()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Every header row, in declaration order.
    fn header_rows(&self) -> Vec<(&'static str, usize)> {
        let mut rows = vec![("type_row", self.type_row), ("name_row", self.name_row)];
        let optional = [
            ("description_row", self.description_row),
            ("remark_row", self.remark_row),
            ("label_row", self.label_row),
            ("default_row", self.default_row),
        ];
        rows.extend(
            optional
                .into_iter()
                .filter_map(|(name, row)| row.map(|row| (name, row))),
        );

        rows
    }

    /// Last row that belongs to the header.
    #[must_use]
    pub fn header_height(&self) -> usize {
        self.header_rows()
            .into_iter()
            .map(|(_, row)| row)
            .max()
            .unwrap_or(0)
    }

    pub fn check(&self) -> Result<(), LayoutError> {
        if self.first_column == 0 {
            return Err(LayoutError("first_column must be at least 1".to_string()));
        }

        let rows = self.header_rows();
        for (name, row) in &rows {
            if *row == 0 {
                return Err(LayoutError(format!("{name} must be at least 1")));
            }
            if *row >= self.data_row {
                return Err(LayoutError(format!(
                    "{name} ({row}) must come before data_row ({})",
                    self.data_row
                )));
            }
        }
        for (i, (a, row_a)) in rows.iter().enumerate() {
            for (b, row_b) in rows.iter().skip(i + 1) {
                if row_a == row_b {
                    return Err(LayoutError(format!("{a} and {b} both use row {row_a}")));
                }
            }
        }

        Ok(())
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self::compact()
    }
}

///
/// TESTS
///
