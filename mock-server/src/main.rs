//! Mock backend binary.
//!
//! # Environment Variables
//!
//! - `PORT`: listen port (default: 3000)
//! - `DDASH_MOCK_SEED`: `1` to start with demo data
//! - `DDASH_MOCK_FAIL`: comma-separated collection slugs that answer 500
//! - `RUST_LOG`: log filter (default: info)

use std::env;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mock_server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let seeded = env::var("DDASH_MOCK_SEED").is_ok_and(|v| v == "1")
        || env::args().any(|arg| arg == "--seed");
    let state = if seeded {
        AppState::seeded().map_err(|e| anyhow::anyhow!("seeding failed: {e:?}"))?
    } else {
        AppState::new()
    };
    if let Ok(failing) = env::var("DDASH_MOCK_FAIL") {
        for slug in failing.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            info!(slug, "injecting failures");
            state.fail(slug).await;
        }
    }

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, seeded, "mock backend listening");
    mock_server::serve(listener, state).await?;
    Ok(())
}
