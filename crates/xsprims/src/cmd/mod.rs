use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;
use crate::settings::Settings;

pub mod check;
pub mod doctor;
pub mod envinfo;
pub mod errno;
pub mod exchange;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate store paths.
    Path(PathArgs),
    /// Validate watch paths (store paths or @introduceDomain/@releaseDomain).
    Watch(WatchArgs),
    /// Validate permission tokens.
    Perms(PermsArgs),
    /// Translate errno codes or names.
    Errno(ErrnoArgs),
    /// Send raw bytes over a channel and read an exact-length reply.
    Exchange(ExchangeArgs),
    /// Probe xenstore endpoints.
    Doctor(DoctorArgs),
    /// Print build information and effective settings.
    Envinfo(EnvinfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, settings: &Settings) -> CliResult<i32> {
    match command {
        Command::Path(args) => check::run_path(args, format),
        Command::Watch(args) => check::run_watch(args, format),
        Command::Perms(args) => check::run_perms(args, format),
        Command::Errno(args) => errno::run(args, format),
        Command::Exchange(args) => exchange::run(args, format, settings),
        Command::Doctor(args) => doctor::run(args, format, settings),
        Command::Envinfo(args) => envinfo::run(args, format, settings),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Paths to check.
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Watch paths to check.
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PermsArgs {
    /// Permission tokens to check (e.g. r0 b5).
    #[arg(required = true)]
    pub tokens: Vec<String>,
    /// Reject tokens with characters after the domain id.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ErrnoArgs {
    /// Errno codes (22) or names (EINVAL).
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Endpoint to open. Defaults to XENSTORED_PATH, then the well-known endpoints.
    pub path: Option<PathBuf>,
    /// Raw string payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
    /// Number of reply bytes to read.
    #[arg(long, default_value = "0")]
    pub read: usize,
    /// Socket read/write timeout (e.g. 5s, 500ms).
    #[arg(long)]
    pub timeout: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    /// Probe only this endpoint.
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Endpoints to try: `--path`, then `XENSTORED_PATH` (read once into
/// settings), then the built-in list.
pub fn candidate_endpoints(explicit: Option<PathBuf>, settings: &Settings) -> Vec<PathBuf> {
    match explicit.or_else(|| settings.endpoint()) {
        Some(path) => vec![path],
        None => xsprims_transport::builtin_endpoints(),
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
