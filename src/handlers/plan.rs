use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::GateError;
use crate::handlers::ClientIdentity;
use crate::metrics::{PLAN_REJECTIONS, PLAN_REQUESTS, TRACKED_CLIENTS};
use crate::models::{PlanRequest, PlanResponse};
use crate::state::AppState;

pub async fn plan_handler(
    State(state): State<Arc<AppState>>,
    ClientIdentity(identity): ClientIdentity,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, GateError> {
    PLAN_REQUESTS.inc();
    let start = Instant::now();

    // rejected before the limiter, so a bad body never spends quota
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(client = %identity, error = %rejection, "undecodable plan body");
            let e = GateError::MalformedBody;
            PLAN_REJECTIONS.with_label_values(&[e.reason()]).inc();
            return Err(e);
        }
    };
    let goals = request.goals.unwrap_or_default();

    let result = state
        .orchestrator
        .plan(&goals, &identity, state.clock.now())
        .await;
    TRACKED_CLIENTS.set(state.rate_limiter.tracked() as f64);

    match result {
        Ok(plan) => {
            tracing::info!(
                client = %identity,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "plan generated"
            );
            Ok(Json(PlanResponse {
                quote: plan.quote,
                plan: plan.plan,
            }))
        }
        Err(e) => {
            PLAN_REJECTIONS.with_label_values(&[e.reason()]).inc();
            Err(e)
        }
    }
}
