//! Webhook delivery for CliHub.
//!
//! Job status transitions are POSTed as JSON to caller-supplied URLs,
//! signed with HMAC-SHA256, and retried with linear backoff. Delivery is
//! best-effort: after the configured retries are exhausted the update is
//! logged and dropped.

pub mod payload;
pub mod sender;
pub mod signature;

pub use payload::JobStatusUpdate;
pub use sender::WebhookSender;
