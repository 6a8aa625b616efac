use anyhow::Context;
use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use plan_gateway::config::Args;
use plan_gateway::gateway::HttpGateway;
use plan_gateway::orchestrator::PlanOrchestrator;
use plan_gateway::pruner::rate_limit_pruner;
use plan_gateway::rate_limit::{Clock, RateLimiter, SystemClock};
use plan_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a .env file is optional, real environment variables win
    let dotenv = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments, a missing api key stops us here
    let args = Args::parse();
    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded environment file");
    }

    let gateway = HttpGateway::new(
        reqwest::Client::new(),
        &args.provider_url,
        args.api_key.clone(),
        args.model.clone(),
        args.provider_timeout(),
    );
    let model = gateway.model().to_string();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_limiter = Arc::new(RateLimiter::new(args.rate_limit, args.rate_window()));

    let state = Arc::new(AppState {
        orchestrator: PlanOrchestrator::new(Arc::clone(&rate_limiter), Arc::new(gateway)),
        rate_limiter: Arc::clone(&rate_limiter),
        clock: Arc::clone(&clock),
        index_file: args.index_file.clone(),
    });

    // spawn the background pruner
    tokio::spawn(rate_limit_pruner(
        Arc::clone(&rate_limiter),
        Arc::clone(&clock),
        args.prune_interval(),
    ));

    let app = plan_gateway::app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(port = args.port, "gateway running on http://localhost:{}", args.port);
    tracing::info!(provider = %args.provider_url, model = %model, "forwarding completions");
    tracing::info!(
        "Rate limit: {} requests per {} seconds per client",
        args.rate_limit,
        args.rate_window
    );

    // client identity comes from the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
