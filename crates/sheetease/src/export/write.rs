use crate::export::{Artifact, ArtifactKind, ExportError};
use rayon::prelude::*;
use sheetease_config::{Behavior, ExportConfig};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Side-file extension kept next to produced files (Unity `.meta`).
const META_EXTENSION: &str = "meta";

///
/// WriteOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

///
/// Placement
///
/// One artifact bound to one destination path.
///

#[derive(Debug)]
pub struct Placement<'a> {
    pub path: PathBuf,
    pub artifact: &'a Artifact,
}

/// Destination paths of every artifact. Data goes to every data directory;
/// code and enum files are dropped when their directory is not configured.
pub fn place<'a>(artifacts: &'a [Artifact], config: &ExportConfig) -> Vec<Placement<'a>> {
    let mut placements = Vec::new();

    for artifact in artifacts {
        let dirs: Vec<&Path> = match artifact.kind {
            ArtifactKind::Data => config.data_dirs.iter().map(PathBuf::as_path).collect(),
            ArtifactKind::Code => config.code_dir.as_deref().into_iter().collect(),
            ArtifactKind::Enums => config.enum_dir().into_iter().collect(),
        };

        placements.extend(dirs.into_iter().map(|dir| Placement {
            path: dir.join(&artifact.file_name),
            artifact,
        }));
    }

    placements
}

/// Write placements in parallel. With `diff_only`, files whose bytes are
/// already current are left alone; with `dry_run`, nothing is touched and
/// the would-be outcome is returned.
pub fn write_all(
    placements: &[Placement<'_>],
    behavior: Behavior,
) -> Result<Vec<(PathBuf, WriteOutcome)>, ExportError> {
    placements
        .par_iter()
        .map(|placement| {
            let outcome = write_one(&placement.path, &placement.artifact.bytes, behavior)?;
            Ok((placement.path.clone(), outcome))
        })
        .collect()
}

fn write_one(path: &Path, bytes: &[u8], behavior: Behavior) -> Result<WriteOutcome, ExportError> {
    if behavior.diff_only && fs::read(path).is_ok_and(|current| current == bytes) {
        debug!(file = %path.display(), "unchanged");
        return Ok(WriteOutcome::Unchanged);
    }
    if behavior.dry_run {
        debug!(file = %path.display(), "would write");
        return Ok(WriteOutcome::Written);
    }

    let fail = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    fs::write(path, bytes).map_err(fail)?;
    debug!(file = %path.display(), bytes = bytes.len(), "written");

    Ok(WriteOutcome::Written)
}

/// Delete files under `dirs` that are not in `produced`. A `.meta` file
/// survives when the file it describes was produced.
pub fn prune(
    dirs: &[&Path],
    produced: &BTreeSet<PathBuf>,
    dry_run: bool,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut stale = Vec::new();
    let mut seen = BTreeSet::new();

    for dir in dirs {
        if !dir.is_dir() || !seen.insert(dir.to_path_buf()) {
            continue;
        }
        collect_files(dir, &mut |path| {
            if !is_kept(&path, produced) {
                stale.push(path);
            }
        })?;
    }
    stale.sort();
    stale.dedup();

    for path in &stale {
        warn!(file = %path.display(), dry_run, "pruning stale file");
        if !dry_run {
            fs::remove_file(path).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        }
    }

    Ok(stale)
}

fn is_kept(path: &Path, produced: &BTreeSet<PathBuf>) -> bool {
    if produced.contains(path) {
        return true;
    }

    let is_meta = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(META_EXTENSION));

    is_meta && produced.contains(&path.with_extension(""))
}

fn collect_files(dir: &Path, visit: &mut impl FnMut(PathBuf)) -> Result<(), ExportError> {
    let fail = |source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(fail)? {
        let path = entry.map_err(fail)?.path();
        if path.is_dir() {
            collect_files(&path, visit)?;
        } else {
            visit(path);
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

    fn artifact(kind: ArtifactKind, name: &str, bytes: &str) -> Artifact {
        Artifact {
            kind,
            file_name: name.to_string(),
            bytes: bytes.as_bytes().to_vec(),
        }
    }

    #[test]
    fn data_goes_to_every_data_dir_and_code_only_when_configured() {
        let mut config = ExportConfig::new("in", "client");
        config.data_dirs.push(PathBuf::from("server"));
        let artifacts = [
            artifact(ArtifactKind::Data, "AConfig.json", "{}"),
            artifact(ArtifactKind::Code, "a_info.rs", ""),
            artifact(ArtifactKind::Enums, "a_keys.rs", ""),
        ];

        let paths: Vec<_> = place(&artifacts, &config).into_iter().map(|p| p.path).collect();
        assert_eq!(
            paths,
            [PathBuf::from("client/AConfig.json"), PathBuf::from("server/AConfig.json")]
        );

        config.code_dir = Some(PathBuf::from("code"));
        let paths: Vec<_> = place(&artifacts, &config).into_iter().map(|p| p.path).collect();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[3], PathBuf::from("code/a_keys.rs"));
    }

    #[test]
    fn diff_only_skips_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/AConfig.json");
        let behavior = Behavior::default();

        assert_eq!(write_one(&path, b"{}", behavior).unwrap(), WriteOutcome::Written);
        assert_eq!(write_one(&path, b"{}", behavior).unwrap(), WriteOutcome::Unchanged);

        let always = Behavior {
            diff_only: false,
            ..behavior
        };
        assert_eq!(write_one(&path, b"{}", always).unwrap(), WriteOutcome::Written);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AConfig.json");
        let behavior = Behavior {
            dry_run: true,
            ..Behavior::default()
        };

        assert_eq!(write_one(&path, b"{}", behavior).unwrap(), WriteOutcome::Written);
        assert!(!path.exists());
    }

    #[test]
    fn prune_keeps_produced_files_and_their_meta() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["A.json", "A.json.meta", "Old.json", "Old.json.meta", "sub/B.json"] {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"").unwrap();
        }
        let produced: BTreeSet<_> = [root.join("A.json")].into_iter().collect();

        let planned = prune(&[root], &produced, true).unwrap();
        assert_eq!(planned.len(), 3);
        assert!(root.join("Old.json").exists());

        let pruned = prune(&[root, root], &produced, false).unwrap();
        assert_eq!(
            pruned,
            [root.join("Old.json"), root.join("Old.json.meta"), root.join("sub/B.json")]
        );
        assert!(root.join("A.json.meta").exists());
        assert!(!root.join("Old.json").exists());
    }
}
