//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use msgbridge_runtime::BackendKind;

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the Messages-API proxy
    Serve(ServeArgs),

    /// Print the flattened prompt for a request body (reads stdin when no file is given)
    Normalize {
        /// Path to a JSON request body
        file: Option<PathBuf>,
    },
}

/// Options for `msgbridge serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "MSGBRIDGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the proxy to
    #[arg(short, long, env = "MSGBRIDGE_PORT", default_value = "8787")]
    pub port: u16,

    /// Pause after each simulated streaming delta, in milliseconds
    #[arg(long, env = "MSGBRIDGE_CHUNK_DELAY_MS", default_value = "20")]
    pub chunk_delay_ms: u64,

    /// Backend adapter: "openai" or "echo"
    #[arg(long, env = "MSGBRIDGE_BACKEND", default_value = "openai")]
    pub backend: BackendKind,

    /// Root URL of the OpenAI-compatible backend
    #[arg(long, env = "MSGBRIDGE_BACKEND_URL", default_value = "http://127.0.0.1:8080")]
    pub backend_url: String,

    /// Model name sent to the backend (backend default when unset)
    #[arg(long, env = "MSGBRIDGE_BACKEND_MODEL")]
    pub backend_model: Option<String>,

    /// Bearer token for the backend
    #[arg(long, env = "MSGBRIDGE_BACKEND_API_KEY", hide_env_values = true)]
    pub backend_api_key: Option<String>,

    /// Upper bound on a single backend call, in seconds
    #[arg(long, env = "MSGBRIDGE_REQUEST_TIMEOUT_SECS", default_value = "300")]
    pub request_timeout_secs: u64,
}
