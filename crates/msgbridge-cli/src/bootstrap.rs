//! Composition root helpers.
//!
//! Turns parsed `serve` arguments into the concrete backend adapter and the
//! proxy configuration. Nothing else in the CLI constructs adapters.

use std::sync::Arc;
use std::time::Duration;

use msgbridge_core::TextGenerationPort;
use msgbridge_proxy::ProxyConfig;
use msgbridge_runtime::{BackendKind, EchoBackend, OpenAiCompatBackend, OpenAiCompatConfig};

use crate::commands::ServeArgs;
use crate::error::CliError;

/// Build the backend adapter selected by `--backend`.
pub fn build_backend(args: &ServeArgs) -> Result<Arc<dyn TextGenerationPort>, CliError> {
    match args.backend {
        BackendKind::Echo => Ok(Arc::new(EchoBackend)),
        BackendKind::OpenAi => {
            if args.backend_url.trim().is_empty() {
                return Err(CliError::Config("--backend-url must not be empty".to_string()));
            }
            if args.request_timeout_secs == 0 {
                return Err(CliError::Config(
                    "--request-timeout-secs must be greater than zero".to_string(),
                ));
            }
            let backend = OpenAiCompatBackend::new(OpenAiCompatConfig {
                base_url: args.backend_url.clone(),
                model: args.backend_model.clone(),
                api_key: args.backend_api_key.clone(),
                timeout: Duration::from_secs(args.request_timeout_secs),
            })?;
            Ok(Arc::new(backend))
        }
    }
}

/// Proxy bind address and pacing from `serve` arguments.
pub fn proxy_config(args: &ServeArgs) -> ProxyConfig {
    ProxyConfig {
        host: args.host.clone(),
        port: args.port,
        chunk_delay: Duration::from_millis(args.chunk_delay_ms),
    }
}
