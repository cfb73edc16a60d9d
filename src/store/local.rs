// Local directory store.
//
// File names coming from callers are plain names inside one of the kind
// folders; anything that looks like a path is rejected so a request can
// never reach outside the data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::traits::RecordStore;
use super::{StoreKind, StoredFile};
use crate::corpus::{tabular, Record};

/// A `RecordStore` backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create the directory layout if needed and open the store.
    pub fn initialize(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in StoreKind::ALL {
            let dir = root.join(kind.dir_name());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(Self { root })
    }

    /// Open an existing store (fails if it hasn't been initialized).
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!(
                "Data directory not found at {}. Run `blogsift init` first.",
                root.display()
            );
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a stored file after validating its name.
    pub fn path_of(&self, kind: StoreKind, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(kind.dir_name()).join(name))
    }
}

/// Read records from any CSV or JSON file on disk.
pub async fn read_records_file(path: &Path) -> Result<Vec<Record>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        tabular::parse_json(&String::from_utf8_lossy(&bytes))
    } else {
        tabular::parse_csv(&bytes)
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
    {
        anyhow::bail!("Invalid file name '{name}' — expected a plain file name");
    }
    Ok(())
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn load_records(&self, kind: StoreKind, name: &str) -> Result<Vec<Record>> {
        let path = self.path_of(kind, name)?;
        let records = read_records_file(&path).await?;
        info!(kind = %kind, name, records = records.len(), "Loaded corpus");
        Ok(records)
    }

    async fn save(&self, kind: StoreKind, name: &str, contents: &[u8]) -> Result<()> {
        let path = self.path_of(kind, name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(kind = %kind, name, bytes = contents.len(), "Saved file");
        Ok(())
    }

    async fn list(&self, kind: StoreKind) -> Result<Vec<StoredFile>> {
        let dir = self.root.join(kind.dir_name());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("Failed to list {}", dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            files.push(StoredFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    async fn prune(&self, kind: StoreKind, keep: &[String]) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for file in self.list(kind).await? {
            if keep.iter().any(|k| *k == file.name) {
                continue;
            }
            let path = self.root.join(kind.dir_name()).join(&file.name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!(kind = %kind, name = %file.name, "Deleted file");
                    removed.push(file.name);
                }
                Err(e) => {
                    warn!(kind = %kind, name = %file.name, error = %e, "Failed to delete file");
                }
            }
        }
        Ok(removed)
    }
}
