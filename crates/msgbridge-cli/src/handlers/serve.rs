//! Serve command handler.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bootstrap::{build_backend, proxy_config};
use crate::commands::ServeArgs;

/// Execute the serve command.
///
/// Binds the configured address and runs the proxy until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let backend = build_backend(args)?;
    let config = proxy_config(args);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    info!(
        backend = %args.backend,
        chunk_delay_ms = args.chunk_delay_ms,
        "Starting msgbridge"
    );

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), cancel.clone()));

    msgbridge_proxy::serve(listener, backend, config.chunk_delay, cancel).await
}

/// Cancel `token` once `signal` fires.
///
/// A signal listener that fails to install leaves the token alone, so the
/// server keeps running instead of shutting down on startup.
async fn cancel_on_signal<F>(signal: F, token: CancellationToken) -> std::io::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for Ctrl-C, graceful shutdown disabled: {e}");
        return Err(e);
    }
    info!("Shutdown signal received");
    token.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_cancels_token() {
        let token = CancellationToken::new();
        cancel_on_signal(std::future::ready(Ok(())), token.clone())
            .await
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_failed_signal_listener_keeps_serving() {
        let token = CancellationToken::new();
        let result = cancel_on_signal(
            std::future::ready(Err(std::io::Error::other("no signal support"))),
            token.clone(),
        )
        .await;
        assert!(result.is_err());
        assert!(!token.is_cancelled());
    }
}
