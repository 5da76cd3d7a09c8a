use std::{net::SocketAddr, path::Path};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{metrics, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate and assemble the router for an already validated config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_upload_dir(Path::new(&cfg.uploads.dir)).await?;
    common::env::ensure_sqlite_parent(&cfg.database.url).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
    }

    metrics::init();
    let state = ServerState::new(db, &cfg.auth, &cfg.uploads);
    Ok(routes::build_router(state, build_cors(), cfg.uploads.max_body_bytes))
}

/// Serve until Ctrl+C, letting in-flight requests finish.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, uploads = %cfg.uploads.dir, "starting storefront server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped accepting connections");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
