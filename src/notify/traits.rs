// Notifier trait — how finished background results reach the caller.
//
// The web service answers a similarity request immediately and delivers the
// matches later. The default implementation posts to a webhook; without one
// configured, results are only logged.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Delivers finished results (or failures) to whoever asked for them.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a finished result. `payload` is the JSON-encoded record array.
    async fn notify_result(&self, user_id: &str, payload: &str) -> Result<()>;

    /// Report that a background job failed.
    async fn notify_error(&self, user_id: &str, message: &str) -> Result<()>;
}

/// Notifier used when no webhook is configured. Logs and succeeds.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_result(&self, user_id: &str, payload: &str) -> Result<()> {
        info!(user_id, bytes = payload.len(), "No webhook configured, result not delivered");
        Ok(())
    }

    async fn notify_error(&self, user_id: &str, message: &str) -> Result<()> {
        info!(user_id, message, "No webhook configured, error not delivered");
        Ok(())
    }
}
