use crate::domain::models::{PackageInfo, StatsDocument};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error("corrupt statistics file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn stats_file_path(dir: &Path, period_key: &str) -> PathBuf {
    dir.join(format!("{}.json", period_key))
}

/// Creates the statistics directory and, on first access for a period, a
/// seed file containing `{"packages": []}`, then loads the document. A file
/// that exists but does not deserialize is surfaced as `Corrupt` so the
/// caller aborts instead of silently overwriting a period's history.
pub fn ensure_and_load(dir: &Path, period_key: &str) -> Result<StatsDocument, StatsError> {
    let path = stats_file_path(dir, period_key);
    let io_err = |p: &Path| {
        let p = p.to_path_buf();
        move |e: std::io::Error| StatsError::Io { path: p, source: e }
    };
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    if !path.exists() {
        save(dir, period_key, &StatsDocument::default())?;
        return Ok(StatsDocument::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(io_err(&path))?;
    serde_json::from_str(&raw).map_err(|e| StatsError::Corrupt {
        path: path.clone(),
        reason: e.to_string(),
    })
}

/// Merge policy: replace the record with the same package name, else
/// append. One record per package per period.
pub fn merge_package(doc: &mut StatsDocument, info: PackageInfo) {
    if let Some(existing) = doc.packages.iter_mut().find(|p| p.name == info.name) {
        *existing = info;
    } else {
        doc.packages.push(info);
    }
}

/// Whole-file rewrite of one period's document, flushed before returning.
pub fn save(dir: &Path, period_key: &str, doc: &StatsDocument) -> Result<(), StatsError> {
    use std::io::Write;
    let path = stats_file_path(dir, period_key);
    let body = serde_json::to_string_pretty(doc).map_err(|e| StatsError::Corrupt {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let io_err = |e: std::io::Error| StatsError::Io {
        path: path.clone(),
        source: e,
    };
    let mut file = std::fs::File::create(&path).map_err(io_err)?;
    file.write_all(body.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_and_load, merge_package, save, stats_file_path, StatsError};
    use crate::domain::models::{PackageInfo, StatsDocument};

    fn info(name: &str, downloads: Option<u64>) -> PackageInfo {
        PackageInfo {
            name: name.to_string(),
            version: None,
            description: None,
            monthly_downloads: downloads,
            fetched_at: None,
        }
    }

    #[test]
    fn first_access_seeds_empty_package_list() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let doc = ensure_and_load(tmp.path(), "03.2024").expect("load");
        assert!(doc.packages.is_empty());
        let raw = std::fs::read_to_string(stats_file_path(tmp.path(), "03.2024")).expect("read");
        let seeded: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(seeded, serde_json::json!({"packages": []}));
    }

    #[test]
    fn merge_replaces_by_name_and_appends_new() {
        let mut doc = StatsDocument {
            packages: vec![info("a", Some(1))],
        };
        merge_package(&mut doc, info("a", Some(9)));
        merge_package(&mut doc, info("b", Some(2)));
        assert_eq!(doc.packages.len(), 2);
        assert_eq!(doc.packages[0].name, "a");
        assert_eq!(doc.packages[0].monthly_downloads, Some(9));
        assert_eq!(doc.packages[1].name, "b");
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let doc = StatsDocument {
            packages: vec![info("left-pad", Some(1000))],
        };
        save(tmp.path(), "12.2024", &doc).expect("save");
        let loaded = ensure_and_load(tmp.path(), "12.2024").expect("load");
        assert_eq!(loaded.packages.len(), 1);
        assert_eq!(loaded.packages[0].name, "left-pad");
    }

    #[test]
    fn malformed_and_missing_packages_field_are_corrupt() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = stats_file_path(tmp.path(), "01.2025");
        std::fs::write(&path, "{oops").expect("write");
        assert!(matches!(
            ensure_and_load(tmp.path(), "01.2025"),
            Err(StatsError::Corrupt { .. })
        ));
        std::fs::write(&path, "{\"totals\": []}").expect("write");
        assert!(matches!(
            ensure_and_load(tmp.path(), "01.2025"),
            Err(StatsError::Corrupt { .. })
        ));
    }
}
