mod cli;
mod context;
mod driver;
mod handlers;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEBUG_LOG_ENV: &str = "BOARD_MIGRATE_DEBUG_LOG";
const LOG_ENV: &str = "BOARD_MIGRATE_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if let Err(e) = run(cli).await {
        tracing::debug!("Migration failed: {:?}", e);
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Boards(args) => handlers::boards::handle(args).await,
        Commands::Migrate(args) => {
            let mut ctx = CliContext::load(cli.config.as_deref())?;
            handlers::migrate::handle(&mut ctx, args).await
        }
        Commands::Completions { shell } => {
            handlers::completions::handle(shell);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var(DEBUG_LOG_ENV) {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
        return Ok(());
    }

    // stdout carries the JSON envelope, so logs go to stderr
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}
