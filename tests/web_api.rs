// Web API tests: requests go through the full router with a local store in
// a scratch directory and a notifier that records what it was sent.

#![cfg(feature = "web")]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use blogsift::config::Config;
use blogsift::notify::{Notifier, RetryPolicy};
use blogsift::store::{LocalStore, RecordStore, StoreKind};
use blogsift::text::{Normalizer, Stopwords};
use blogsift::web::{build_router, AppState};

#[derive(Default)]
struct RecordingNotifier {
    results: Mutex<Vec<(String, String)>>,
    errors: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_result(&self, user_id: &str, payload: &str) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap()
            .push((user_id.to_string(), payload.to_string()));
        Ok(())
    }

    async fn notify_error(&self, user_id: &str, message: &str) -> anyhow::Result<()> {
        self.errors
            .lock()
            .unwrap()
            .push((user_id.to_string(), message.to_string()));
        Ok(())
    }
}

struct Harness {
    dir: PathBuf,
    state: AppState,
    notifier: Arc<RecordingNotifier>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

async fn harness(name: &str) -> Harness {
    let dir = std::env::temp_dir().join(format!("blogsift-web-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let store = LocalStore::initialize(&dir).unwrap();

    store
        .save(
            StoreKind::Extracted,
            "ref.csv",
            b"Title,Meta Description\nC,unrelated topic about weather\nA,dubai apartment for sale\n",
        )
        .await
        .unwrap();
    store
        .save(
            StoreKind::Extracted,
            "cand.csv",
            b"Title,Meta Description\nB,apartment for sale in dubai\nB,dubai apartment sale\n",
        )
        .await
        .unwrap();

    let config = Config {
        data_dir: dir.clone(),
        stopwords_path: None,
        unique_threshold: 0.5,
        similar_threshold: 0.5,
        webhook_url: None,
        webhook_retry: RetryPolicy::default(),
        allowed_origins: Vec::new(),
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let normalizer = Arc::new(Normalizer::new(Arc::new(Stopwords::english().unwrap())));
    let state = AppState::new(
        config,
        Arc::new(store) as Arc<dyn RecordStore>,
        notifier.clone() as Arc<dyn Notifier>,
        normalizer,
    );

    Harness {
        dir,
        state,
        notifier,
    }
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = build_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ============================================================
// Health and progress
// ============================================================

#[tokio::test]
async fn health_is_ok() {
    let h = harness("health").await;
    let (status, body) = send(&h.state, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn progress_reports_counters_and_job() {
    let h = harness("progress").await;
    let (status, body) = send(&h.state, get("/api/progress")).await;
    assert_eq!(status, StatusCode::OK);
    for kind in ["unique", "similar"] {
        assert_eq!(body[kind]["current"], 0);
        assert_eq!(body[kind]["total"], 0);
        assert_eq!(body[kind]["complete"], true);
    }
    assert_eq!(body["job"]["running"], false);
}

// ============================================================
// /unique_content
// ============================================================

#[tokio::test]
async fn unique_content_saves_outputs() {
    let h = harness("unique").await;
    let (status, body) = send(&h.state, get("/unique_content/ref.csv/cand.csv")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Message"], "Files Saved");
    assert_eq!(body["unique_count"], 1);

    let csv_name = body["CSV_FileName"].as_str().unwrap();
    let json_name = body["JSON_FileName"].as_str().unwrap();
    assert!(h.dir.join("unique").join(csv_name).is_file());
    assert!(h.dir.join("unique").join(json_name).is_file());

    let progress = h.state.unique_progress.snapshot();
    assert_eq!(progress.total, 2);
    assert!(progress.is_complete());
}

#[tokio::test]
async fn unique_content_leaves_similar_counters_alone() {
    let h = harness("unique-overlap").await;
    // A similarity job partway through its batch
    h.state.similar_progress.start(5);
    h.state.similar_progress.advance(2, 1);

    let (status, _) = send(&h.state, get("/unique_content/ref.csv/cand.csv")).await;
    assert_eq!(status, StatusCode::OK);

    let similar = h.state.similar_progress.snapshot();
    assert_eq!((similar.current, similar.total, similar.emitted), (2, 5, 1));

    let (_, body) = send(&h.state, get("/api/progress")).await;
    assert_eq!(body["unique"]["total"], 2);
    assert_eq!(body["unique"]["complete"], true);
    assert_eq!(body["similar"]["current"], 2);
    assert_eq!(body["similar"]["total"], 5);
    assert_eq!(body["similar"]["complete"], false);
}

#[tokio::test]
async fn unique_content_missing_corpus_is_404() {
    let h = harness("unique-missing").await;
    let (status, body) = send(&h.state, get("/unique_content/nope.csv/cand.csv")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope.csv"));
}

// ============================================================
// /similar_content
// ============================================================

#[tokio::test]
async fn similar_content_requires_user_id() {
    let h = harness("similar-user").await;
    let (status, _) = send(&h.state, get("/similar_content/cand.csv/dubai")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn similar_content_delivers_matches_to_notifier() {
    let h = harness("similar").await;
    let (status, body) = send(
        &h.state,
        get("/similar_content/cand.csv/dubai%20apartment%20sale?user_id=u1"),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "Processing started");

    for _ in 0..200 {
        if !h.state.job_status.read().await.running {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let job = h.state.job_status.read().await.clone();
    assert!(!job.running, "job did not finish");
    assert_eq!(job.last_match_count, Some(1));
    assert!(job.last_error.is_none());

    let results = h.notifier.results.lock().unwrap().clone();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "u1");
    let matches: serde_json::Value = serde_json::from_str(&results[0].1).unwrap();
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["Similar Title"], "B");
    assert_eq!(matches[0]["Topic"], "dubai apartment sale");
    // Scores travel as text cells like every other field
    let similarity = matches[0]["Similarity"].as_str().unwrap();
    assert!(similarity.parse::<f64>().unwrap() > 0.5);

    let progress = h.state.similar_progress.snapshot();
    assert_eq!(progress.total, 2);
    assert!(progress.is_complete());
    assert_eq!(h.state.unique_progress.snapshot().total, 0);
}

#[tokio::test]
async fn similar_content_failure_is_reported_as_error() {
    let h = harness("similar-fail").await;
    let (status, _) = send(&h.state, get("/similar_content/missing.csv/dubai?user_id=u2")).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    for _ in 0..200 {
        if !h.state.job_status.read().await.running {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(h.state.job_status.read().await.last_error.is_some());
    let errors = h.notifier.errors.lock().unwrap().clone();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "u2");
}

#[tokio::test]
async fn similar_content_conflicts_while_running() {
    let h = harness("similar-busy").await;
    h.state.job_status.write().await.running = true;

    let (status, _) = send(&h.state, get("/similar_content/cand.csv/dubai?user_id=u1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ============================================================
// /delete_file
// ============================================================

#[tokio::test]
async fn delete_file_keeps_only_listed_files() {
    let h = harness("delete").await;
    let request = Request::builder()
        .method("POST")
        .uri("/delete_file")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"link": [], "CSV": ["ref.csv"], "Unique": []}"#))
        .unwrap();

    let (status, body) = send(&h.state, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Message"], "Files deleted successfully");
    assert_eq!(body["deleted"]["extracted"][0], "cand.csv");

    assert!(h.dir.join("extracted").join("ref.csv").is_file());
    assert!(!h.dir.join("extracted").join("cand.csv").exists());
}
