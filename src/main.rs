use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod error;
mod output;
mod parser;
mod provider;
mod research;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a local .env; absence is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("polyresearch=debug")
    } else {
        EnvFilter::new("polyresearch=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Show(args) => cli::show::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
