use super::{SheetGrid, SourceRef};
use serde::Serialize;

/// First data row of an enum sheet; row 1 is a free-form caption row.
const ENUM_DATA_ROW: usize = 2;

///
/// EnumMemberDraft
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumMemberDraft {
    pub line: usize,
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

///
/// EnumDraft
///
/// Standalone enumeration read from an `Enum-` sheet: one member per row,
/// columns are name, integer value and description.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumDraft {
    pub name: String,
    pub source: SourceRef,
    pub members: Vec<EnumMemberDraft>,
}

/// Read an enum sheet. The caller has already matched the prefix.
#[must_use]
pub fn load_enum(grid: &SheetGrid, source: &SourceRef, prefix: &str) -> EnumDraft {
    let name = grid
        .name
        .strip_prefix(prefix)
        .unwrap_or(&grid.name)
        .to_string();

    let members = (ENUM_DATA_ROW..=grid.height())
        .filter_map(|line| {
            let name = grid.cell(line, 1).trim();
            let value = grid.cell(line, 2).trim();
            let description = grid.cell(line, 3).trim();

            if name.is_empty() && value.is_empty() && description.is_empty() {
                return None;
            }

            Some(EnumMemberDraft {
                line,
                name: name.to_string(),
                value: value.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
            })
        })
        .collect();

    EnumDraft {
        name,
        source: source.clone(),
        members,
    }
}

///
/// TESTS
///
