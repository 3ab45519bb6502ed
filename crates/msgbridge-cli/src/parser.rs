//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Serve a Messages-API front end over a text-only generation backend.
#[derive(Parser)]
#[command(name = "msgbridge")]
#[command(about = "Messages-API adapter for single-shot text generation backends")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
