// Result files — the unique set is written to the store as CSV and JSON lines
// under the names carried by the result.

use anyhow::Result;

use crate::corpus::tabular;
use crate::output::OutputNames;
use crate::pipeline::dedup::UniqueResult;
use crate::store::{RecordStore, StoreKind};

/// Save a uniqueness result to the `unique` folder. Returns the names used.
pub async fn save_unique(store: &dyn RecordStore, result: &UniqueResult) -> Result<OutputNames> {
    let rows = result.output_rows();
    let names = result.output_names.clone();

    store
        .save(StoreKind::Unique, &names.csv, &tabular::to_csv(&rows)?)
        .await?;
    store
        .save(
            StoreKind::Unique,
            &names.json,
            tabular::to_json_lines(&rows)?.as_bytes(),
        )
        .await?;

    Ok(names)
}
