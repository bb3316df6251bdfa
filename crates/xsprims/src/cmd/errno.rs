use serde::Serialize;
use xsprims_errno::{error, StoreError};

use crate::cmd::ErrnoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct ErrnoRow {
    input: String,
    code: i32,
    name: Option<&'static str>,
    message: String,
}

pub fn run(args: ErrnoArgs, format: OutputFormat) -> CliResult<i32> {
    let rows: Vec<ErrnoRow> = args.ids.iter().map(|id| to_row(id)).collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => print_table(
            &["INPUT", "CODE", "NAME", "MESSAGE"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.input.clone(),
                        r.code.to_string(),
                        r.name.unwrap_or("-").to_string(),
                        r.message.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for r in &rows {
                println!("{:<12} {:>4} {}", r.name.unwrap_or("-"), r.code, r.message);
            }
        }
        OutputFormat::Raw => {
            for r in &rows {
                println!("{}", r.code);
            }
        }
    }

    Ok(SUCCESS)
}

fn translate(id: &str) -> StoreError {
    match id.parse::<i32>() {
        Ok(code) => error(code),
        Err(_) => error(id),
    }
}

fn to_row(id: &str) -> ErrnoRow {
    let err = translate(id);
    ErrnoRow {
        input: id.to_string(),
        code: err.code(),
        name: err.name(),
        message: err.message().to_string(),
    }
}
