mod cmd;
mod exit;
mod logging;
mod output;
mod settings;

use clap::Parser;

use crate::cmd::Command;
use crate::exit::CliError;
use crate::logging::{init_logging, LogFormat, LogLevel, LogSettings};
use crate::output::OutputFormat;
use crate::settings::{FlagValues, Settings};

#[derive(Parser, Debug)]
#[command(name = "xsprims", version, about = "XenStore channel and validation toolkit")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr). Falls back to XSPRIMS_LOG_FORMAT, then text.
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Minimum log level (stderr). Falls back to XSPRIMS_LOG_LEVEL, then info.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let flags = FlagValues {
        log_level: cli.log_level,
        log_format: cli.log_format,
    };
    let settings = match Settings::resolve(&flags) {
        Ok(settings) => settings,
        Err(err) => exit_with(err),
    };
    match LogSettings::from_settings(&settings) {
        Ok(log) => init_logging(log),
        Err(err) => exit_with(err),
    }

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format, &settings) {
        Ok(code) => std::process::exit(code),
        Err(err) => exit_with(err),
    }
}

fn exit_with(err: CliError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(err.code);
}
