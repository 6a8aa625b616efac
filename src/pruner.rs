use std::sync::Arc;
use tokio::time::{Duration, interval};

use crate::metrics::TRACKED_CLIENTS;
use crate::rate_limit::{Clock, RateLimiter};

// Periodically forgets clients whose window has emptied out
pub async fn rate_limit_pruner(
    rate_limiter: Arc<RateLimiter>,
    clock: Arc<dyn Clock>,
    prune_interval: Duration,
) {
    let mut interval = interval(prune_interval);

    tracing::info!(interval = ?prune_interval, "rate limit pruner started");

    loop {
        interval.tick().await;

        let removed = rate_limiter.prune(clock.now());
        let tracked = rate_limiter.tracked();
        TRACKED_CLIENTS.set(tracked as f64);

        if removed > 0 {
            tracing::debug!(removed, tracked, "pruned idle rate limit entries");
        }
    }
}
