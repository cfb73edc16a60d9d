// Corpus storage — a directory tree with one folder per kind of file.
//
//   <data dir>/links/      crawled article link lists
//   <data dir>/extracted/  extracted article corpora (CSV)
//   <data dir>/unique/     uniqueness results (CSV + JSON lines)

pub mod local;
pub mod traits;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use local::LocalStore;
pub use traits::RecordStore;

/// The folders a store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoreKind {
    Links,
    Extracted,
    Unique,
}

impl StoreKind {
    pub const ALL: [StoreKind; 3] = [StoreKind::Links, StoreKind::Extracted, StoreKind::Unique];

    pub fn dir_name(self) -> &'static str {
        match self {
            StoreKind::Links => "links",
            StoreKind::Extracted => "extracted",
            StoreKind::Unique => "unique",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A file held by the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Files to keep in each folder when pruning. Field names match the
/// `/delete_file` request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeepLists {
    #[serde(default)]
    pub link: Vec<String>,
    #[serde(default, rename = "CSV")]
    pub csv: Vec<String>,
    #[serde(default, rename = "Unique")]
    pub unique: Vec<String>,
}

impl KeepLists {
    pub fn for_kind(&self, kind: StoreKind) -> &[String] {
        match kind {
            StoreKind::Links => &self.link,
            StoreKind::Extracted => &self.csv,
            StoreKind::Unique => &self.unique,
        }
    }
}

/// Prune every folder down to its keep list. Returns what was removed.
pub async fn prune_except(
    store: &dyn RecordStore,
    keep: &KeepLists,
) -> Result<Vec<(StoreKind, Vec<String>)>> {
    let mut removed = Vec::with_capacity(StoreKind::ALL.len());
    for kind in StoreKind::ALL {
        removed.push((kind, store.prune(kind, keep.for_kind(kind)).await?));
    }
    Ok(removed)
}
