mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::middleware::AuthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = motodir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = motodir_db::PoolConfig::from_app_config(&config);
    let pool = motodir_db::connect_pool(&config.database_url, pool_config).await?;
    motodir_db::run_migrations(&pool).await?;

    let auth = AuthState::from_config(&config)?;
    let overpass = motodir_osm::OverpassClient::with_endpoint(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.overpass_user_agent,
    )?;

    let state = AppState {
        pool,
        overpass: Arc::new(overpass),
        import_delay: Duration::from_millis(config.import_delay_ms),
        import_lock: Arc::new(tokio::sync::Mutex::new(())),
    };
    let app = build_app(state, auth);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting motodir server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
