use std::path::PathBuf;
use std::sync::Arc;

use crate::orchestrator::PlanOrchestrator;
use crate::rate_limit::{Clock, RateLimiter};

// app's shared state
pub struct AppState {
    pub orchestrator: PlanOrchestrator,
    pub rate_limiter: Arc<RateLimiter>, // also held by the orchestrator and the pruner
    pub clock: Arc<dyn Clock>,
    pub index_file: PathBuf, // page served on "/"
}
