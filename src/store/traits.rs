// Record store trait — where corpora are read from and results written to.
//
// The pipelines never touch storage themselves; the CLI and web layers load
// whole corpora through this trait, hand them to the pipelines, and save the
// finished output back.

use anyhow::Result;
use async_trait::async_trait;

use super::{StoreKind, StoredFile};
use crate::corpus::Record;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every record from a stored CSV or JSON file.
    async fn load_records(&self, kind: StoreKind, name: &str) -> Result<Vec<Record>>;

    /// Write (or overwrite) a stored file.
    async fn save(&self, kind: StoreKind, name: &str, contents: &[u8]) -> Result<()>;

    /// List stored files, sorted by name.
    async fn list(&self, kind: StoreKind) -> Result<Vec<StoredFile>>;

    /// Delete every file not named in `keep`. Returns the names removed.
    /// A file that cannot be deleted is logged and skipped.
    async fn prune(&self, kind: StoreKind, keep: &[String]) -> Result<Vec<String>>;
}
