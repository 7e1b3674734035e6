use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use explain_error_daemon::config::{DaemonConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_BODY_LIMIT_BYTES};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "explain-error-daemon", version, about = "Error report classification API")]
struct Cli {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Browser origin allowed to call the API. Repeat for several.
    #[arg(long = "allowed-origin", default_values_t = DEFAULT_ALLOWED_ORIGINS.map(String::from))]
    allowed_origins: Vec<String>,

    /// Maximum accepted request body, in bytes.
    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT_BYTES)]
    body_limit_bytes: usize,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&cli.log))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = DaemonConfig {
        listen: SocketAddr::new(cli.host, cli.port),
        allowed_origins: cli.allowed_origins,
        body_limit_bytes: cli.body_limit_bytes,
    };
    config.validate()?;

    info!(?config, "starting daemon");

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("ExplainError API listening on {}", listener.local_addr()?);

    explain_error_daemon::serve(listener, &config, shutdown_signal()).await
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
