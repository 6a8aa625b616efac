use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, TextEncoder, register_counter,
    register_counter_vec, register_gauge, register_histogram,
};

lazy_static! {
    pub static ref PLAN_REQUESTS: Counter =
        register_counter!("plan_requests_total", "Total number of plan requests").unwrap();
    pub static ref PLAN_REJECTIONS: CounterVec = register_counter_vec!(
        "plan_rejections_total",
        "Plan requests that did not get a plan, by reason",
        &["reason"]
    )
    .unwrap();
    pub static ref PROVIDER_LATENCY: Histogram = register_histogram!(
        "plan_provider_latency_seconds",
        "Latency of a single completion call in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "plan_rate_limit_tracked_clients",
        "Client identities currently held by the rate limiter"
    )
    .unwrap();
}

// Prometheus text exposition of everything registered
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
