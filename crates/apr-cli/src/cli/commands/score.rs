use apr_core::ScoreClient;

use super::{cancel_on_ctrl_c, report_error};
use crate::cli::args::{ClientArgs, OutputFormat, ScoreArgs};
use crate::exit_codes::SUCCESS;

pub async fn run(args: ScoreArgs, client_args: &ClientArgs) -> anyhow::Result<i32> {
    let client = match ScoreClient::new(client_args.config()) {
        Ok(client) => client,
        Err(e) => return Ok(report_error(&e)),
    };
    let user_id = args.user_id;
    let cancel = cancel_on_ctrl_c();

    let apr = match client.apr_for_user(user_id, &cancel).await {
        Ok(apr) => apr,
        Err(e) => return Ok(report_error(&e)),
    };

    match args.format {
        OutputFormat::Text => println!("{}: {:?}", user_id, apr),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "user_id": user_id,
                "apr": apr,
            }))?
        ),
    }

    Ok(SUCCESS)
}
