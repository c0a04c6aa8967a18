mod model;
mod server;

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::server::{
    config::Config, error::AppError, middleware::cache::ResponseCache, router,
    scheduler::maintenance, startup, state::AppState, util::jwt::JwtKeys,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_expires_in_secs);
    let cache = ResponseCache::new(
        config.cache_capacity,
        Duration::from_secs(config.cache_ttl_secs),
    );

    let upload_dir = PathBuf::from(&config.upload_dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    maintenance::start_scheduler(db.clone(), cache.clone()).await?;

    let state = AppState::new(db, jwt, cache, upload_dir);
    let app = router::rate_limited_router(state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
    tracing::info!("Depot listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }

    tracing::info!("Shutdown signal received, stopping server");
}
