#![forbid(unsafe_code)]

//! HTTP front end for the error classifier.

use std::future::Future;

use tokio::net::TcpListener;

pub mod config;
pub mod http;

use crate::config::DaemonConfig;

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    config: &DaemonConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = http::router(config)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
