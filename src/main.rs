use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dexterm::app::AppContext;
use dexterm::cli::{commands, Cli, Commands};
use dexterm::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file.
    if matches!(command, Commands::Tui) {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(AppContext::log_path()?)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let mut config = Config::load()?;
    if let Some(limit) = cli.limit {
        config.api.limit = limit;
    }
    if let Some(batch_size) = cli.batch_size {
        config.api.batch_size = batch_size;
    }

    let ctx = AppContext::new(None, &config.api)?;

    match command {
        Commands::Tui => {
            dexterm::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::List(args) => {
            commands::list(&ctx, &config.display, &args).await?;
        }
        Commands::Show { id } => {
            commands::show(&ctx, id).await?;
        }
        Commands::Fav { id } => {
            commands::toggle_favorite(&ctx, id)?;
        }
        Commands::Favs => {
            commands::list_favorites(&ctx)?;
        }
    }

    Ok(())
}
