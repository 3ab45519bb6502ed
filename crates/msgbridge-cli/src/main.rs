//! CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use msgbridge_cli::{Cli, CliError, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => {
            if let Err(e) = handlers::serve::execute(&args).await {
                if let Some(cli_err) = e.downcast_ref::<CliError>() {
                    eprintln!("Error: {cli_err}");
                    std::process::exit(cli_err.exit_code());
                }
                return Err(e);
            }
        }
        Commands::Normalize { file } => {
            if let Err(e) = handlers::normalize::execute(file.as_deref()) {
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code());
            }
        }
    }

    Ok(())
}
