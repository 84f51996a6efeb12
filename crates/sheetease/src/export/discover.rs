use crate::export::ExportError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Workbook extensions read by the exporter.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

///
/// Discovery
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Discovery {
    /// Workbooks to read, sorted by path.
    pub files: Vec<PathBuf>,

    /// Workbooks skipped by the naming rule.
    pub skipped: Vec<PathBuf>,
}

/// Recursively find workbooks under `input`, or take `input` itself when
/// it is a file. Office lock files (`~$Name.xlsx`) are ignored.
pub fn discover(input: &Path, skip_lowercase: bool) -> Result<Discovery, ExportError> {
    let mut found = Vec::new();
    if input.is_file() {
        found.push(input.to_path_buf());
    } else {
        walk(input, &mut found)?;
    }
    found.sort();

    let mut discovery = Discovery::default();
    for path in found {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with("~$") || !is_workbook(&path) {
            continue;
        }
        if skip_lowercase && !name.starts_with(|c: char| c.is_uppercase()) {
            warn!(file = %path.display(), "skipping workbook: name does not start with an uppercase letter");
            discovery.skipped.push(path);
            continue;
        }

        discovery.files.push(path);
    }

    Ok(discovery)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), ExportError> {
    let entries = fs::read_dir(dir).map_err(|source| ExportError::ReadInput {
        path: dir.to_path_buf(),
        source: source.into(),
    })?;

    for entry in entries {
        let path = entry
            .map_err(|source| ExportError::ReadInput {
                path: dir.to_path_buf(),
                source: source.into(),
            })?
            .path();

        if path.is_dir() {
            walk(&path, found)?;
        } else {
            found.push(path);
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_workbooks_recursively_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Weapons.xlsx"));
        touch(&root.join("items/Armor.ods"));
        touch(&root.join("items/~$Armor.xlsx"));
        touch(&root.join("notes.txt"));
        touch(&root.join("draft.xlsx"));

        let discovery = discover(root, true).unwrap();

        assert_eq!(
            discovery.files,
            [root.join("Weapons.xlsx"), root.join("items/Armor.ods")]
        );
        assert_eq!(discovery.skipped, [root.join("draft.xlsx")]);

        let all = discover(root, false).unwrap();
        assert_eq!(all.files.len(), 3);
        assert!(all.skipped.is_empty());
    }

    #[test]
    fn single_file_input_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Skills.xlsx");
        touch(&file);

        assert_eq!(discover(&file, true).unwrap().files, [file]);
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            discover(&dir.path().join("nope"), true),
            Err(ExportError::ReadInput { .. })
        ));
    }
}
