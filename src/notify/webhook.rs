// Webhook notifier — posts finished results to the configured URL.
//
// Body shapes the receiving service expects:
//   success: {"result": "<JSON array of records>", "userId": "..."}
//   failure: {"error": "<message>", "userId": "..."}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::retry::{with_retry, HttpStatusError, RetryPolicy};
use super::traits::Notifier;

/// Posts results to a webhook, retrying transient failures.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ResultBody<'a> {
    result: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
            retry,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post<B: Serialize + Sync>(&self, body: &B) -> Result<()> {
        with_retry(&self.retry, || async {
            let response = self.client.post(&self.url).json(body).send().await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(HttpStatusError { status, body }.into());
            }

            debug!(url = %self.url, "Webhook accepted");
            Ok::<(), anyhow::Error>(())
        })
        .await
        .with_context(|| format!("Webhook delivery to {} failed", self.url))
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_result(&self, user_id: &str, payload: &str) -> Result<()> {
        self.post(&ResultBody {
            result: payload,
            user_id,
        })
        .await?;
        info!(user_id, "Webhook notification sent");
        Ok(())
    }

    async fn notify_error(&self, user_id: &str, message: &str) -> Result<()> {
        self.post(&ErrorBody {
            error: message,
            user_id,
        })
        .await?;
        info!(user_id, "Webhook error notification sent");
        Ok(())
    }
}
