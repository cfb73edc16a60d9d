// Background similarity job — started by GET /similar_content/{corpus}/{topic}.
//
// The request returns 202 straight away; the batch runs on the blocking pool
// and its matches (or the failure) go to the notifier. Only one similarity
// job runs at a time; the handler answers 409 while one is active.

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::corpus::tabular;
use crate::pipeline::{find_similar, BatchOptions};
use crate::store::StoreKind;
use crate::web::AppState;

/// Live status of the background similarity job, exposed via GET /api/progress.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobStatus {
    /// True while a job is in progress.
    pub running: bool,
    /// RFC 3339 timestamp of when the current/last job started.
    pub started_at: Option<String>,
    pub topic: Option<String>,
    pub corpus: Option<String>,
    /// Matches delivered by the last successful job.
    pub last_match_count: Option<usize>,
    /// Error message from the last job, if it failed.
    pub last_error: Option<String>,
}

impl JobStatus {
    /// Mark a new job as started. Returns false if one is already running.
    pub fn try_start(&mut self, corpus: &str, topic: &str) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.started_at = Some(Utc::now().to_rfc3339());
        self.corpus = Some(corpus.to_string());
        self.topic = Some(topic.to_string());
        self.last_error = None;
        true
    }
}

/// Launch the similarity search in a background tokio task.
/// Returns immediately. Callers poll GET /api/progress to track it.
pub fn launch_similar(state: AppState, corpus: String, topic: String, user_id: String) {
    tokio::spawn(async move {
        let outcome = run_similar(&state, &corpus, &topic).await;

        let delivery = match &outcome {
            Ok((payload, _)) => state.notifier.notify_result(&user_id, payload).await,
            Err(e) => state.notifier.notify_error(&user_id, &format!("{e:#}")).await,
        };
        if let Err(e) = &delivery {
            error!(user_id = %user_id, error = %e, "Failed to deliver similarity result");
        }

        let mut status = state.job_status.write().await;
        status.running = false;
        match outcome {
            Ok((_, matches)) => {
                info!(corpus = %corpus, topic = %topic, matches, "Background similarity job completed");
                status.last_match_count = Some(matches);
                status.last_error = delivery.err().map(|e| format!("{e:#}"));
            }
            Err(e) => {
                error!(corpus = %corpus, topic = %topic, error = %e, "Background similarity job failed");
                status.last_error = Some(format!("{e:#}"));
            }
        }
    });
}

/// Load the corpus, run the search, and encode the matches as a JSON array.
async fn run_similar(
    state: &AppState,
    corpus: &str,
    topic: &str,
) -> anyhow::Result<(String, usize)> {
    let candidate = state.store.load_records(StoreKind::Extracted, corpus).await?;

    let normalizer = state.normalizer.clone();
    let progress = state.similar_progress.clone();
    let options = BatchOptions {
        threshold: state.config.similar_threshold,
        ..BatchOptions::default()
    };
    let topic = topic.to_string();

    let result = tokio::task::spawn_blocking(move || {
        find_similar(&normalizer, &topic, &candidate, &options, &progress)
    })
    .await
    .context("Similarity batch panicked")?;

    let payload = tabular::to_json_array(&result.output_rows())?;
    Ok((payload, result.len()))
}
