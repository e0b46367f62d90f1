use std::{net::SocketAddr, sync::Arc};

use todo_server::{
    config::AppConfig, db::connection, logging::init_tracing, routes::app,
    services::ServiceContext, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging.rust_log);

    let db = connection::connect(&cfg.database).await?;
    let services = ServiceContext::new(&db);
    let state = AppState::new(cfg, services);

    let addr: SocketAddr = format!("{}:{}", state.config.general.host, state.config.general.port)
        .parse()
        .map_err(|err| anyhow::anyhow!("invalid host/port: {err}"))?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(Arc::clone(&state))).await?;
    Ok(())
}
