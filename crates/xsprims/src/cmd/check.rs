use serde::Serialize;
use tracing::warn;
use xsprims_validate::{
    validate_path, validate_perms_with, validate_watch_path, ValidationConfig, ValidationError,
};

use crate::cmd::{PathArgs, PermsArgs, WatchArgs};
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct CheckRow {
    input: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    kind: &'static str,
    valid: bool,
    results: Vec<CheckRow>,
}

pub fn run_path(args: PathArgs, format: OutputFormat) -> CliResult<i32> {
    let rows = args
        .paths
        .iter()
        .map(|p| row(p, validate_path(p).map(drop)))
        .collect();
    report("path", rows, format)
}

pub fn run_watch(args: WatchArgs, format: OutputFormat) -> CliResult<i32> {
    let rows = args
        .paths
        .iter()
        .map(|p| row(p, validate_watch_path(p).map(drop)))
        .collect();
    report("watch", rows, format)
}

pub fn run_perms(args: PermsArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ValidationConfig {
        strict_perms: args.strict,
    };
    // One token at a time so every failure is reported, not just the first.
    let rows = args
        .tokens
        .iter()
        .map(|t| row(t, validate_perms_with(std::slice::from_ref(t), &config).map(drop)))
        .collect();
    report("perms", rows, format)
}

fn row(input: &str, result: Result<(), ValidationError>) -> CheckRow {
    CheckRow {
        input: input.to_string(),
        valid: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
    }
}

fn report(kind: &'static str, results: Vec<CheckRow>, format: OutputFormat) -> CliResult<i32> {
    for rejected in results.iter().filter(|r| !r.valid) {
        warn!(kind, input = %rejected.input, "validation failed");
    }

    let output = CheckOutput {
        kind,
        valid: results.iter().all(|r| r.valid),
        results,
    };
    print_check(&output, format);

    if output.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn print_check(output: &CheckOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table => print_table(
            &["INPUT", "VALID", "ERROR"],
            output
                .results
                .iter()
                .map(|r| {
                    vec![
                        r.input.clone(),
                        r.valid.to_string(),
                        r.error.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for r in &output.results {
                match &r.error {
                    None => println!("  ok   {}", r.input),
                    Some(err) => println!("  FAIL {} ({err})", r.input),
                }
            }
        }
        OutputFormat::Raw => println!("{}", if output.valid { "valid" } else { "invalid" }),
    }
}
