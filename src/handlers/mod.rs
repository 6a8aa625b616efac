mod health;
mod identity;
mod index;
mod metrics;
mod plan;

pub use health::health_handler;
pub use identity::ClientIdentity;
pub use index::index_handler;
pub use metrics::metrics_handler;
pub use plan::plan_handler;
