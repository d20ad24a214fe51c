use std::collections::BTreeMap;

use apr_core::{BatchReport, BatchRunner, FailurePolicy, ScoreClient};

use super::{cancel_on_ctrl_c, report_error};
use crate::cli::args::{BatchArgs, ClientArgs, OutputFormat};
use crate::exit_codes::{PARTIAL_FAILURE, SUCCESS};

pub async fn run(args: BatchArgs, client_args: &ClientArgs) -> anyhow::Result<i32> {
    let client = match ScoreClient::new(client_args.config()) {
        Ok(client) => client,
        Err(e) => return Ok(report_error(&e)),
    };

    let mut runner = BatchRunner::new(client);
    if args.isolate {
        runner = runner.with_policy(FailurePolicy::Isolate);
    }
    if let Some(n) = args.max_concurrency {
        runner = runner.with_max_concurrency(n);
    }

    let cancel = cancel_on_ctrl_c();

    let report = match runner.run(&args.ids, &cancel).await {
        Ok(report) => report,
        Err(e) => return Ok(report_error(&e)),
    };

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&report))?),
    }

    if report.is_complete() {
        Ok(SUCCESS)
    } else {
        Ok(PARTIAL_FAILURE)
    }
}

fn print_text(report: &BatchReport) {
    for (user_id, apr) in &report.aprs {
        println!("{}: {:?}", user_id, apr);
    }
    if !report.is_complete() {
        let invalid: Vec<String> = report.invalid_ids.keys().map(|id| id.to_string()).collect();
        println!("invalid ids: [{}]", invalid.join(", "));
    }
}

fn to_json(report: &BatchReport) -> serde_json::Value {
    let invalid: BTreeMap<String, String> = report
        .invalid_ids
        .iter()
        .map(|(id, err)| (id.to_string(), err.to_string()))
        .collect();
    serde_json::json!({
        "aprs": report.aprs,
        "invalid_ids": invalid,
    })
}
