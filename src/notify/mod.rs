// Result delivery for background jobs.

pub mod retry;
pub mod traits;
pub mod webhook;

pub use retry::RetryPolicy;
pub use traits::{NoopNotifier, Notifier};
pub use webhook::WebhookNotifier;
