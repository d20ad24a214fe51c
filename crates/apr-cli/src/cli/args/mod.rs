use apr_core::UserId;
use clap::{Parser, Subcommand};

pub mod common;
pub use common::*;

#[derive(Parser)]
#[command(
    name = "apr",
    version,
    about = "Fetch equifax and experian credit scores and compute placeholder APRs"
)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the APR for one user
    Score(ScoreArgs),
    /// Compute APRs for many users concurrently
    Batch(BatchArgs),
}

#[derive(clap::Args, Clone, Debug)]
pub struct ScoreArgs {
    /// User id to look up
    pub user_id: UserId,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Clone, Debug)]
pub struct BatchArgs {
    /// User ids to look up
    #[arg(default_values_t = [UserId(1), UserId(2), UserId(3), UserId(4), UserId(5)])]
    pub ids: Vec<UserId>,

    /// Record failing ids instead of failing the whole batch
    #[arg(long)]
    pub isolate: bool,

    /// Users fetched at once (default: APR_MAX_CONCURRENCY or 8)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
