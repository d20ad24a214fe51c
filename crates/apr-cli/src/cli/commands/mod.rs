use apr_core::{AprError, CancellationToken};
use tracing::warn;

use super::args::*;

pub mod batch;
pub mod score;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Score(args) => score::run(args, &cli.client).await,
        Command::Batch(args) => batch::run(args, &cli.client).await,
    }
}

/// Token cancelled on Ctrl-C, so in-flight fetches stop early.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            trigger.cancel();
        }
    });
    cancel
}

/// Print a pipeline error and map it to its exit code.
pub(crate) fn report_error(err: &AprError) -> i32 {
    eprintln!("error: {err}");
    err.exit_code()
}
