use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "board-migrate")]
#[command(about = "Migrate Trello boards into existing Vikunja projects", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Config file to use instead of <config dir>/board-migrate/config.toml
    #[arg(long, global = true, value_name = "FILE", env = "BOARD_MIGRATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List boards that have a destination project of the same title
    Boards(InputArgs),
    /// Convert selected boards and upload them
    Migrate(MigrateArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Trello board snapshot (one board or an array of boards)
    #[arg(long, value_name = "FILE", default_value = "trello.json")]
    pub source: PathBuf,

    /// Vikunja projects, including their views
    #[arg(long, value_name = "FILE", default_value = "data.json")]
    pub projects: PathBuf,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Convert and fetch attachments without uploading anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the resulting hierarchy, with server ids, to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SelectionArgs {
    /// Board title to migrate (repeatable)
    #[arg(long = "board", value_name = "TITLE")]
    pub boards: Vec<String>,

    /// Board numbers from `board-migrate boards`, e.g. 1,3,4
    #[arg(long, value_name = "NUMBERS")]
    pub select: Option<String>,

    /// Migrate every board that has a matching project
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Trello API key
    #[arg(long, value_name = "KEY")]
    pub trello_key: Option<String>,

    /// Trello API token
    #[arg(long, value_name = "TOKEN")]
    pub trello_token: Option<String>,

    /// Vikunja API base URL, e.g. https://tasks.example.com/api/v1
    #[arg(long, value_name = "URL")]
    pub vikunja_url: Option<String>,

    /// Vikunja API token
    #[arg(long, value_name = "TOKEN")]
    pub vikunja_token: Option<String>,

    /// Upload rate limit
    #[arg(long, value_name = "N")]
    pub requests_per_second: Option<u32>,
}
