use std::path::Path;

use serde::Serialize;
use tracing::debug;
use xsprims_transport::{HandleKind, TransportError, XsHandle};

use crate::cmd::{candidate_endpoints, DoctorArgs};
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::{print_json, OutputFormat};
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat, settings: &Settings) -> CliResult<i32> {
    let mut checks = vec![platform_check()];

    let endpoints = candidate_endpoints(args.path, settings);
    if endpoints.is_empty() {
        checks.push(CheckResult {
            name: "endpoints".to_string(),
            status: CheckStatus::Fail,
            detail: "no default endpoints on this platform; pass --path or set XENSTORED_PATH"
                .to_string(),
        });
    }
    checks.extend(endpoints.iter().map(|path| endpoint_check(path)));

    let reachable = checks.iter().any(|c| c.status == CheckStatus::Pass);
    let output = DoctorOutput {
        checks,
        overall: if reachable { "pass" } else { "fail" },
    };

    print_doctor(&output, format);

    if reachable {
        Ok(SUCCESS)
    } else {
        Ok(HEALTH_CHECK_FAILED)
    }
}

fn platform_check() -> CheckResult {
    let detail = if cfg!(unix) {
        "xenstored socket and xenbus device endpoints supported"
    } else {
        "PV bus device endpoints supported"
    };
    CheckResult {
        name: "platform".to_string(),
        status: CheckStatus::Info,
        detail: detail.to_string(),
    }
}

fn endpoint_check(path: &Path) -> CheckResult {
    let name = format!("endpoint {}", path.display());

    // Windows device namespace paths do not show up in the filesystem.
    if cfg!(unix) && !path.exists() {
        return CheckResult {
            name,
            status: CheckStatus::Skip,
            detail: "not present".to_string(),
        };
    }

    match XsHandle::open(path) {
        Ok(handle) => {
            let mut detail = format!("opened as {}", handle.kind().as_str());
            if handle.kind() == HandleKind::Socket {
                if let Some(peer) = handle.peer_credentials() {
                    detail.push_str(&format!(
                        " (daemon pid {} uid {})",
                        peer.pid, peer.uid
                    ));
                }
            }
            let closed = handle.close();
            CheckResult {
                name,
                status: CheckStatus::Pass,
                detail: with_close_result(detail, closed),
            }
        }
        Err(err) => CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn with_close_result(mut detail: String, closed: Result<(), TransportError>) -> String {
    if let Err(err) = closed {
        debug!(error = %err, "endpoint close failed");
        detail.push_str(&format!("; close failed: {err}"));
    }
    detail
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("xsprims doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<36} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: xenstore reachable");
            } else {
                println!("\n  Result: no usable xenstore endpoint");
            }
        }
        OutputFormat::Raw => println!("{}", output.overall),
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn missing_endpoint_is_skipped() {
        let check = endpoint_check(Path::new("/nonexistent/xsprims/xenbus"));
        assert_eq!(check.status, CheckStatus::Skip);
    }

    #[test]
    #[cfg(unix)]
    fn openable_endpoint_passes() {
        let dir = std::env::temp_dir().join(format!("xsprims-doctor-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dev = dir.join("xenbus");
        std::fs::write(&dev, b"").unwrap();

        let check = endpoint_check(&dev);
        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(check.detail, "opened as device");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn close_failure_is_reported_in_detail() {
        let err = TransportError::Io(std::io::Error::other("socket gone"));
        let detail = with_close_result("opened as socket".to_string(), Err(err));
        assert_eq!(detail, "opened as socket; close failed: transport I/O error: socket gone");

        let detail = with_close_result("opened as device".to_string(), Ok(()));
        assert_eq!(detail, "opened as device");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&CheckStatus::Skip).unwrap();
        assert_eq!(json, "\"skip\"");
    }
}
