// Web server — Axum-based JSON API over the corpus store.
//
// GET  /health                                   liveness
// GET  /unique_content/{reference}/{candidate}   run a uniqueness batch, save outputs
// GET  /similar_content/{corpus}/{topic}         start a background similarity job
// GET  /api/progress                             batch counters per job kind
// POST /delete_file                              prune stored files
//
// Batches run on the blocking pool so request handling never stalls on them.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::notify::Notifier;
use crate::pipeline::Progress;
use crate::store::RecordStore;
use crate::text::Normalizer;

pub mod handlers;
pub mod jobs;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn Notifier>,
    pub normalizer: Arc<Normalizer>,
    /// Counters of the latest /unique_content batch
    pub unique_progress: Arc<Progress>,
    /// Counters of the latest background similarity job
    pub similar_progress: Arc<Progress>,
    pub job_status: Arc<RwLock<jobs::JobStatus>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        normalizer: Arc<Normalizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            notifier,
            normalizer,
            unique_progress: Arc::new(Progress::new()),
            similar_progress: Arc::new(Progress::new()),
            job_status: Arc::new(RwLock::new(jobs::JobStatus::default())),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Blogsift API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(health))
        .route(
            "/unique_content/{reference}/{candidate}",
            get(handlers::unique::unique_content),
        )
        .route(
            "/similar_content/{corpus}/{topic}",
            get(handlers::similar::similar_content),
        )
        .route("/api/progress", get(handlers::progress::get_progress))
        .route("/delete_file", post(handlers::files::delete_files))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin when none are configured, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
