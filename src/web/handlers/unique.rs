// GET /unique_content/{reference}/{candidate} — uniqueness batch.
//
// Both names refer to files in the store's `extracted/` folder. The batch
// runs to completion before the response is sent; the result is saved to
// `unique/` as CSV and JSON lines.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::store_error;
use crate::output::files::save_unique;
use crate::pipeline::{deduplicate, BatchOptions};
use crate::store::StoreKind;
use crate::web::{api_error, AppState};

pub async fn unique_content(
    State(state): State<AppState>,
    Path((reference, candidate)): Path<(String, String)>,
) -> Response {
    let reference_records = match state
        .store
        .load_records(StoreKind::Extracted, &reference)
        .await
    {
        Ok(records) => records,
        Err(e) => return store_error(&e),
    };
    let candidate_records = match state
        .store
        .load_records(StoreKind::Extracted, &candidate)
        .await
    {
        Ok(records) => records,
        Err(e) => return store_error(&e),
    };

    let normalizer = state.normalizer.clone();
    let progress = state.unique_progress.clone();
    let options = BatchOptions {
        threshold: state.config.unique_threshold,
        ..BatchOptions::default()
    };

    let result = match tokio::task::spawn_blocking(move || {
        deduplicate(
            &normalizer,
            &reference_records,
            &candidate_records,
            &options,
            &progress,
        )
    })
    .await
    {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Uniqueness batch panicked");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Uniqueness batch failed");
        }
    };

    let names = match save_unique(state.store.as_ref(), &result).await {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Failed to save uniqueness output");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}"));
        }
    };

    Json(serde_json::json!({
        "Message": "Files Saved",
        "CSV_FileName": names.csv,
        "JSON_FileName": names.json,
        "unique_count": result.len(),
    }))
    .into_response()
}
