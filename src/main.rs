use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use ibnsina_backend::config::Config;
use ibnsina_backend::logging;
use ibnsina_backend::server;
use ibnsina_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    logging::init(&config.log_dir);

    let state = AppState::initialize(config).await;

    let bind_addr = format!("127.0.0.1:{}", state.config.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("Listening on {}", addr);

    let app: Router = server::router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
