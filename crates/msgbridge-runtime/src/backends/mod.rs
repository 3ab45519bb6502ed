//! Text generation backend adapters.

mod echo;
mod openai_compat;

use std::fmt;
use std::str::FromStr;

pub use echo::EchoBackend;
pub use openai_compat::{OpenAiCompatBackend, OpenAiCompatConfig};

/// Which adapter to run behind the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI-compatible `/v1/chat/completions` server.
    OpenAi,
    /// Return the prompt unchanged.
    Echo,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai-compat" => Ok(Self::OpenAi),
            "echo" => Ok(Self::Echo),
            other => Err(format!(
                "unknown backend '{other}' (expected 'openai' or 'echo')"
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Echo => write!(f, "echo"),
        }
    }
}
