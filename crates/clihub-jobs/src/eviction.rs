//! Periodic job history eviction.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use clihub_core::config::jobs::JobsConfig;

use crate::store::JobStore;

/// Sweep the store on a fixed interval until `shutdown` fires.
///
/// Each sweep drops finished records past their TTL, then trims the oldest
/// finished records down to the history cap. Records that have not reached
/// a terminal state are left alone regardless of age.
pub async fn run(store: Arc<JobStore>, config: JobsConfig, shutdown: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.cleanup_interval_seconds));
    // The first tick fires immediately; an empty sweep at startup is fine.
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let stats = store.cleanup(config.max_history_size).await;
                if stats.expired > 0 || stats.trimmed > 0 {
                    info!(
                        expired = stats.expired,
                        trimmed = stats.trimmed,
                        "evicted finished jobs from history"
                    );
                }
            }
            _ = shutdown.cancelled() => {
                debug!("eviction loop stopped");
                return;
            }
        }
    }
}
