//! dpb server entrypoint.

use clap::Parser;
use dpb_server::{config::Config, serve_router, AppState};
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ENV_HELP: &str = "\
Environment:
  DPB_DIR                 base directory to store paste files (required)
  DPB_MAX_MIB             per-paste upload limit, in MiB (default: 10)
  DPB_ID_LEN              paste identifier length in hex characters (default: 5)
  DPB_NOT_FOUND_DELAY_MS  delay applied to every not-found lookup (default: 3000)
  DPB_MAX_CLAIM_ATTEMPTS  give up after this many identifier collisions (default: unbounded)
  RUST_LOG                log filter (default: dpb=info,dpb_core=info,dpb_server=info,tower_http=warn)";

/// Minimal paste storage server.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "dpb", version, after_help = ENV_HELP)]
struct Cli {
    /// Port to listen on.
    port: u16,

    /// Address to bind.
    #[arg(long, env = "DPB_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dpb=info,dpb_core=info,dpb_server=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::info!(
        dir = %config.base_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        id_len = config.id_len,
        "Opening paste store"
    );
    let state = AppState::open(config)?;

    let bind_addr = SocketAddr::new(cli.bind, cli.port);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("{} running at http://{}", dpb_server::VERSION, actual_addr);

    serve_router(listener, state, shutdown_signal()).await?;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
