//! Board files on disk: load through the store's import, save atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use planner_core::migrate::MigrationReport;
use planner_core::{BoardStore, ExchangeError, StoreConfig};

#[derive(Debug, thiserror::Error)]
pub enum BoardFileError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a board document: {source}")]
    Format {
        path: PathBuf,
        source: ExchangeError,
    },

    #[error("{0} already exists")]
    Exists(PathBuf),
}

/// Read, shape-check and migrate a board file.
pub fn load(path: &Path, config: &StoreConfig) -> Result<(BoardStore, MigrationReport), BoardFileError> {
    let raw = fs::read_to_string(path).map_err(|source| BoardFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut store = BoardStore::new(config.clone());
    let report = store.import_json(&raw).map_err(|source| BoardFileError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    if !report.is_noop() {
        log::info!(
            "[planner.cli.file] Migrated {} from schema {} to {}",
            path.display(),
            report.from_version,
            report.to_version
        );
    }
    Ok((store, report))
}

pub fn save(path: &Path, store: &BoardStore) -> Result<(), BoardFileError> {
    let content = store.export_json().map_err(|source| BoardFileError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &content).map_err(|source| BoardFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("[planner.cli.file] Saved {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Write a new board file, refusing to clobber an existing one unless asked.
pub fn create(path: &Path, store: &BoardStore, overwrite: bool) -> Result<(), BoardFileError> {
    if path.exists() && !overwrite {
        return Err(BoardFileError::Exists(path.to_path_buf()));
    }
    save(path, store)
}

/// Write to a sibling temp file, fsync, then rename over the target.
fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("planner.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    if let Some(dir) = path.parent() {
        if let Ok(d) = fs::File::open(dir) {
            let _ = d.sync_all();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.plnpro");
        let store = BoardStore::default();

        create(&path, &store, false).unwrap();
        let (loaded, report) = load(&path, &StoreConfig::default()).unwrap();
        assert!(report.is_noop());
        assert_eq!(loaded.board(), store.board());
        assert!(!path.with_extension("planner.tmp").exists());
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.plnpro");
        let store = BoardStore::default();
        create(&path, &store, false).unwrap();

        assert!(matches!(create(&path, &store, false), Err(BoardFileError::Exists(_))));
        create(&path, &store, true).unwrap();
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.plnpro");
        assert!(matches!(
            load(&missing, &StoreConfig::default()),
            Err(BoardFileError::Read { .. })
        ));

        let bad = dir.path().join("bad.plnpro");
        fs::write(&bad, r#"{"title": "No lists"}"#).unwrap();
        assert!(matches!(
            load(&bad, &StoreConfig::default()),
            Err(BoardFileError::Format { .. })
        ));
    }
}
