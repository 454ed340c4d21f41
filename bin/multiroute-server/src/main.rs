//! multiroute-server: HTTP front for per-task model routing.
//!
//! Reads its settings from the environment once, wires one shared
//! [`OllamaClient`] behind the four task endpoints, and serves until SIGINT
//! or SIGTERM.

mod config;
mod error;
mod extract;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::sync::Arc;

use multiroute_core::OllamaClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    init_tracing(&cfg);

    info!(
        name = %cfg.app_name,
        version = env!("CARGO_PKG_VERSION"),
        "multiroute-server starting"
    );

    let backend = OllamaClient::new(cfg.backend.clone())?;
    info!(
        endpoint = backend.endpoint(),
        authenticated = cfg.backend.api_key.is_some(),
        temperature = cfg.backend.temperature,
        timeout_secs = cfg.backend.timeout.as_secs(),
        "model backend configured"
    );

    let state = Arc::new(AppState::new(cfg.clone(), Arc::new(backend)));
    for (task, model) in state.router.get_routes() {
        info!(%task, %model, "task routed");
    }

    let listener = tokio::net::TcpListener::bind(&cfg.bind_address).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, routes::build(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("multiroute-server stopped");
    Ok(())
}

/// `RUST_LOG` takes precedence over `MULTIROUTE_LOG`. A filter that does not
/// parse is reported on stderr, since no subscriber exists yet, and replaced
/// with `info`.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| cfg.log_level.parse::<EnvFilter>())
        .unwrap_or_else(|e| {
            eprintln!(
                "WARN: MULTIROUTE_LOG='{}' is not a valid tracing filter ({e}); using 'info'",
                cfg.log_level
            );
            EnvFilter::new("info")
        });

    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if cfg.log_json {
        fmt.json().init();
    } else {
        fmt.init();
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it. A handler
/// that fails to install is logged and treated as never firing.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    info!("shutdown requested, draining connections");
}
