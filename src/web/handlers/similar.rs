// GET /similar_content/{corpus}/{topic}?user_id= — start a similarity job.
//
// Returns 202 Accepted if the job starts.
// Returns 409 Conflict if a job is already running.
//
// The matches are delivered to the notifier when the job finishes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::jobs::launch_similar;
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct SimilarQuery {
    /// Who the result is delivered to
    pub user_id: Option<String>,
}

pub async fn similar_content(
    State(state): State<AppState>,
    Path((corpus, topic)): Path<(String, String)>,
    Query(params): Query<SimilarQuery>,
) -> Response {
    let user_id = match params.user_id.filter(|u| !u.trim().is_empty()) {
        Some(u) => u,
        None => return api_error(StatusCode::BAD_REQUEST, "user_id query parameter is required"),
    };

    let mut status = state.job_status.write().await;
    if !status.try_start(&corpus, &topic) {
        return api_error(StatusCode::CONFLICT, "A similarity job is already running");
    }
    drop(status);

    launch_similar(state.clone(), corpus, topic, user_id);

    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "status": "Processing started",
            "message": "The results will be sent to the webhook when done.",
        })),
    )
        .into_response()
}
