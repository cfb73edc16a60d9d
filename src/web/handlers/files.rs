// POST /delete_file — keep only the listed files in each folder.
//
// Body: {"link": [...], "CSV": [...], "Unique": [...]}. A missing list
// empties that folder.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::store::{prune_except, KeepLists};
use crate::web::{api_error, AppState};

pub async fn delete_files(State(state): State<AppState>, Json(keep): Json<KeepLists>) -> Response {
    let removed = match prune_except(state.store.as_ref(), &keep).await {
        Ok(removed) => removed,
        Err(e) => return api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}")),
    };

    let deleted: serde_json::Map<String, serde_json::Value> = removed
        .into_iter()
        .map(|(kind, names)| (kind.to_string(), serde_json::json!(names)))
        .collect();

    Json(serde_json::json!({
        "Message": "Files deleted successfully",
        "deleted": deleted,
    }))
    .into_response()
}
