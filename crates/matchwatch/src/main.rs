mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Run => commands::run::run(config).await,
        Commands::Once => commands::once::run(config).await,
        Commands::Inspect {
            file,
            player,
            region,
        } => commands::inspect::run(&file, &player, &region),
        Commands::Config => commands::config::run(config),
        Commands::History { stats } => commands::history::run(stats),
        Commands::Version => commands::version::run(),
    }
}
