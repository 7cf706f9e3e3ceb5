use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("file not found: {0}")]
    Missing(PathBuf),
    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Loads a whole JSON document. A missing file is reported distinctly from
/// one that exists but does not parse.
pub fn load_document(path: &Path) -> Result<Value, StoreError> {
    if !path.exists() {
        return Err(StoreError::Missing(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Whole-file rewrite through an explicitly flushed handle; no partial
/// writes survive an error path.
pub fn save_document(path: &Path, doc: &Value) -> Result<(), StoreError> {
    let io_err = |e: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut file = std::fs::File::create(path).map_err(io_err)?;
    let body = serde_json::to_string_pretty(doc).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(body.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}

/// Loads the configuration document, seeding an empty `{}` file on first
/// run. Malformed content and a non-object root are fatal; no mutation is
/// attempted on top of a document we could not read back.
pub fn load_or_init_config(path: &Path) -> anyhow::Result<Value> {
    let doc = match load_document(path) {
        Ok(doc) => doc,
        Err(StoreError::Missing(_)) => {
            let empty = Value::Object(serde_json::Map::new());
            save_document(path, &empty)?;
            eprintln!("notice: created empty config at {}", path.display());
            empty
        }
        Err(e) => return Err(e.into()),
    };
    if !doc.is_object() {
        anyhow::bail!(
            "config root in {} must be a JSON object",
            path.display()
        );
    }
    Ok(doc)
}

pub fn audit(action: &str, data: Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(".config/pkgwatch/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}
