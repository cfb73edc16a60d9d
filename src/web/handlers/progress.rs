// GET /api/progress — batch counters per job kind plus background job status.
//
// Uniqueness requests and the similarity job keep separate counters, so an
// overlapping run of one kind never resets the other.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::pipeline::Progress;
use crate::web::AppState;

pub async fn get_progress(State(state): State<AppState>) -> impl IntoResponse {
    let job = state.job_status.read().await.clone();

    Json(json!({
        "unique": counters(&state.unique_progress),
        "similar": counters(&state.similar_progress),
        "job": job,
    }))
}

fn counters(progress: &Progress) -> Value {
    let snapshot = progress.snapshot();
    json!({
        "current": snapshot.current,
        "total": snapshot.total,
        "emitted": snapshot.emitted,
        "complete": snapshot.is_complete(),
    })
}
