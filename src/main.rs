use std::net::SocketAddr;
use std::sync::Arc;

use axum::serve;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};
use user_posts_api::{
    api,
    infrastructure::{config::Config, state::AppState, store},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Arc::new(Config::from_env()?);
    telemetry::init(&config.telemetry);

    let store = store::build_store(&config.store)?;
    let state = Arc::new(AppState::new(Arc::clone(&config), store));

    let router = api::build_router(Arc::clone(&state));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!(%addr, graphiql = config.graphql.graphiql, "starting user posts graphql api");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server = serve(listener, router.into_make_service());

    tokio::select! {
        res = server => {
            if let Err(err) = res {
                warn!(error = ?err, "server exited with error");
            }
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
