use anyhow::Result;
use gateway::build_state;
use gateway::config::GatewayConfig;
use gateway::router::create_router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::load();

    init_logging(&config.log_level, config.json_logs);

    tracing::info!("Starting Gateway API service v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    tracing::info!(
        base_url = %config.base_url,
        api_prefix = %config.api_prefix,
        timeout_secs = config.upstream_timeout_secs,
        "upstream configured"
    );

    let state = build_state(&config)?;
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(level: &str, json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = if json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
