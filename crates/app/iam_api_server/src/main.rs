//! IAM API server binary.
//!
//! Loads configuration from the environment (and `.env`), builds the router
//! around a fresh in-memory user store, and serves until SIGINT/SIGTERM.

use clap::Parser;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "iam_api_server", about = "IAM API server", version)]
struct Args {
    /// Address to listen on; overrides `BIND_ADDR`.
    #[arg(long, env = "BIND_ADDR")]
    listen: Option<String>,

    /// Disable per-request tracing spans.
    #[arg(long, default_value_t = false)]
    no_request_logging: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(
                    "info,iam_api=debug,iam_core=debug,tower_http=debug",
                )),
        )
        .init();

    let args = Args::parse();

    let mut config = iam_api::config::ApiConfig::from_env()?;
    if let Some(listen) = args.listen {
        config.bind_addr = listen;
    }
    if args.no_request_logging {
        config.request_logging = false;
    }

    info!(
        version = iam_core::version(),
        bind_addr = %config.bind_addr,
        issuer = %config.auth.issuer,
        audience = %config.auth.audience,
        "starting iam_api_server"
    );

    let state = iam_api::AppState::new(config.clone())?;
    let app = iam_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("graceful shutdown completed");
    Ok(())
}

/// Resolves on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
