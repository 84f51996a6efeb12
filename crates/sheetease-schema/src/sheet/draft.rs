use super::{HeaderLayout, SheetGrid, SourceRef};
use crate::{
    diag,
    error::{Diagnostics, Location},
};
use serde::Serialize;

/// Type-row marker for scratch columns.
const IGNORE: &str = "ignore";

///
/// ColumnLabels
///
/// Per-column flags taken from the label row or from `|label` suffixes on
/// the type cell.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ColumnLabels {
    pub ignore: bool,
    pub required: bool,
    pub key: bool,
}

impl ColumnLabels {
    fn apply(&mut self, label: &str) -> Result<(), String> {
        match label.to_ascii_lowercase().as_str() {
            "" => {}
            IGNORE => self.ignore = true,
            "required" => self.required = true,
            "key" => self.key = true,
            other => return Err(other.to_string()),
        }

        Ok(())
    }
}

///
/// ColumnDraft
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnDraft {
    pub type_token: String,
    pub field_name: String,
    pub description: Option<String>,
    pub default: Option<String>,
    pub labels: ColumnLabels,
    pub source_column: usize,
}

///
/// RowDraft
///
/// Raw cells of one data row, aligned with the draft's columns.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RowDraft {
    pub line: usize,
    pub cells: Vec<String>,
}

///
/// TableDraft
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableDraft {
    pub name: String,
    pub source: SourceRef,
    pub columns: Vec<ColumnDraft>,
    pub rows: Vec<RowDraft>,
}

// split_type_cell
// "int|key|required" -> ("int", ["key", "required"])
fn split_type_cell(cell: &str) -> (&str, Vec<&str>) {
    let mut parts = cell.split('|').map(str::trim);
    let token = parts.next().unwrap_or_default();

    (token, parts.collect())
}

fn is_ignored_type(cell: &str) -> bool {
    let (token, labels) = split_type_cell(cell);

    token.is_empty()
        || token.eq_ignore_ascii_case(IGNORE)
        || labels.iter().any(|l| l.eq_ignore_ascii_case(IGNORE))
}

/// Read the meta-header and data rows of one table sheet.
pub fn load_table(
    grid: &SheetGrid,
    source: &SourceRef,
    layout: &HeaderLayout,
) -> Result<TableDraft, Diagnostics> {
    let mut errs = Diagnostics::new();
    let sheet = Location::sheet(source);

    // Phase 1: the header must be present.
    let needed = layout.type_row.max(layout.name_row);
    if grid.height() < needed {
        diag!(
            errs,
            MalformedHeader,
            sheet,
            "sheet has {} row(s) but the header needs at least {needed}",
            grid.height()
        );
        return Err(errs);
    }

    // Phase 2: type and name rows must cover the same columns.
    let first = layout.first_column;
    let type_len = last_column(grid.row_len(layout.type_row), first, |c| {
        !is_ignored_type(grid.cell(layout.type_row, c))
    });
    let name_len = last_column(grid.row_len(layout.name_row), first, |c| {
        !grid.cell(layout.name_row, c).trim().is_empty()
            && !(is_ignored_type(grid.cell(layout.type_row, c))
                && !grid.cell(layout.type_row, c).trim().is_empty())
    });
    if type_len != name_len {
        diag!(
            errs,
            MalformedHeader,
            sheet.clone().at_row(layout.name_row),
            "type row covers {} column(s) but field-name row covers {}",
            (type_len + 1).saturating_sub(first),
            (name_len + 1).saturating_sub(first),
        );
    }

    // Phase 3: columns.
    let mut columns = Vec::new();
    for column in first..=type_len {
        let type_cell = grid.cell(layout.type_row, column);
        if is_ignored_type(type_cell) {
            continue;
        }

        let (token, inline) = split_type_cell(type_cell);
        let mut labels = ColumnLabels::default();
        let label_cell = layout
            .label_row
            .map(|row| grid.cell(row, column).trim())
            .unwrap_or_default();
        for label in inline.into_iter().chain(std::iter::once(label_cell)) {
            if let Err(unknown) = labels.apply(label) {
                diag!(
                    errs,
                    MalformedHeader,
                    sheet.clone().at_row(layout.type_row).at_column(column),
                    "unknown column label '{unknown}'"
                );
            }
        }
        if labels.ignore {
            continue;
        }

        let field_name = grid.cell(layout.name_row, column).trim();
        if field_name.is_empty() {
            if column <= name_len {
                diag!(
                    errs,
                    MalformedHeader,
                    sheet.clone().at_row(layout.name_row).at_column(column),
                    "column with type '{token}' has no field name"
                );
            }
            continue;
        }

        columns.push(ColumnDraft {
            type_token: token.to_string(),
            field_name: field_name.to_string(),
            description: description(grid, layout, column),
            default: layout
                .default_row
                .map(|row| grid.cell(row, column).trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            labels,
            source_column: column,
        });
    }

    if columns.is_empty() && errs.is_empty() {
        diag!(errs, MalformedHeader, sheet, "no exportable columns");
    }
    errs.result()?;

    // Phase 4: data rows, skipping blank ones.
    let rows = (layout.data_row..=grid.height())
        .filter_map(|line| {
            let cells: Vec<String> = columns
                .iter()
                .map(|col| grid.cell(line, col.source_column).to_string())
                .collect();

            let blank = cells.iter().all(|cell| cell.trim().is_empty());

            (!blank).then_some(RowDraft { line, cells })
        })
        .collect();

    Ok(TableDraft {
        name: grid.name.clone(),
        source: source.clone(),
        columns,
        rows,
    })
}

// last_column
// highest 1-based column >= first accepted by `keep`, or first - 1 when none
fn last_column(width: usize, first: usize, keep: impl Fn(usize) -> bool) -> usize {
    (first..=width)
        .rev()
        .find(|&c| keep(c))
        .unwrap_or_else(|| first.saturating_sub(1))
}

// description
// description row, optionally suffixed with the remark row
fn description(grid: &SheetGrid, layout: &HeaderLayout, column: usize) -> Option<String> {
    let text = |row: Option<usize>| {
        row.map(|row| grid.cell(row, column).trim())
            .filter(|text| !text.is_empty())
    };

    match (text(layout.description_row), text(layout.remark_row)) {
        (Some(desc), Some(remark)) => Some(format!("{desc}: {remark}")),
        (Some(desc), None) => Some(desc.to_string()),
        (None, Some(remark)) => Some(remark.to_string()),
        (None, None) => None,
    }
}

///
/// TESTS
///
