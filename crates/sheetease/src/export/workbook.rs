use crate::export::ExportError;
use calamine::{Data, Range, Reader, open_workbook_auto};
use sheetease_schema::sheet::SheetGrid;
use std::path::{Path, PathBuf};

///
/// Workbook
///
/// Every worksheet of one input file, as text grids in workbook order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Workbook {
    pub path: PathBuf,

    /// Name shown in diagnostics, relative to the input root.
    pub name: String,
    pub sheets: Vec<SheetGrid>,
}

impl Workbook {
    pub fn new(name: impl Into<String>, sheets: Vec<SheetGrid>) -> Self {
        let name = name.into();

        Self {
            path: PathBuf::from(&name),
            name,
            sheets,
        }
    }
}

///
/// WorkbookReader
///
/// Turns a workbook file into sheet grids.
///

pub trait WorkbookReader: Sync {
    fn read(&self, path: &Path) -> Result<Vec<SheetGrid>, ExportError>;
}

///
/// CalamineReader
///
/// Reads xlsx, xlsm, xls and ods files with `calamine`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CalamineReader;

impl WorkbookReader for CalamineReader {
    fn read(&self, path: &Path) -> Result<Vec<SheetGrid>, ExportError> {
        let fail = |source: calamine::Error| ExportError::ReadInput {
            path: path.to_path_buf(),
            source: source.into(),
        };

        let mut workbook = open_workbook_auto(path).map_err(fail)?;
        let mut sheets = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(fail)?;
            sheets.push(SheetGrid::new(name, grid_rows(&range)));
        }

        Ok(sheets)
    }
}

// grid_rows
// cell text with the range re-anchored at A1, so grid coordinates equal
// sheet coordinates
fn grid_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (top, left) = range.start().unwrap_or((0, 0));
    let left = usize::try_from(left).unwrap_or(0);
    let top = usize::try_from(top).unwrap_or(0);

    let mut rows = vec![Vec::new(); top];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![String::new(); left];
        cells.extend(row.iter().map(cell_text));
        cells
    }));

    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
