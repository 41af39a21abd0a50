mod clients;
mod config;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use clients::WingsProber;
use clients::aggregator::Aggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub config: Arc<config::Config>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wings_status=info".parse().unwrap()),
        )
        .init();

    let config_path = config_path(std::env::args());

    let cfg = config::Config::load(&PathBuf::from(&config_path)).unwrap_or_else(|e| {
        eprintln!("error loading config: {}", e);
        std::process::exit(1);
    });

    if cfg.nodes.is_empty() {
        info!("no nodes configured; status endpoints will report an empty fleet");
    }

    let prober = WingsProber::new().unwrap_or_else(|e| {
        eprintln!("failed to create HTTP client: {}", e);
        std::process::exit(1);
    });

    let state = AppState {
        aggregator: Arc::new(Aggregator::new(Arc::new(prober))),
        config: Arc::new(cfg),
    };

    let listen_addr = state.config.listen_addr();
    let router = routes::build_router(state);

    let listener = TcpListener::bind(&listen_addr).await.unwrap_or_else(|e| {
        eprintln!("failed to bind {}: {}", listen_addr, e);
        std::process::exit(1);
    });

    info!("wings-status listening on {}", listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            eprintln!("server error: {}", e);
            std::process::exit(1);
        });
}

// First positional argument, or the packaged default.
fn config_path(mut args: impl Iterator<Item = String>) -> String {
    args.nth(1)
        .unwrap_or_else(|| "/etc/wings-status/config.yaml".to_string())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
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
