use serde::Serialize;
use xsprims_transport::PATH_ENV;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    profile: &'static str,
    async_io: bool,
    endpoint_env: &'static str,
    builtin_endpoints: Vec<String>,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            target: option_env!("XSPRIMS_BUILD_TARGET").unwrap_or("unknown"),
            profile: option_env!("XSPRIMS_BUILD_PROFILE").unwrap_or("unknown"),
            async_io: cfg!(feature = "async"),
            endpoint_env: PATH_ENV,
            builtin_endpoints: xsprims_transport::builtin_endpoints()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    let info = VersionInfo::current();

    match (args.extended, format) {
        (_, OutputFormat::Json) => print_json(&info),
        (false, _) => println!("{} {}", info.name, info.version),
        (true, _) => {
            println!("name: {}", info.name);
            println!("version: {}", info.version);
            println!("target: {} ({})", info.target, info.profile);
            println!("async_io: {}", info.async_io);
            println!("endpoint_env: {}", info.endpoint_env);
            if info.builtin_endpoints.is_empty() {
                println!("builtin_endpoints: none");
            } else {
                println!("builtin_endpoints: {}", info.builtin_endpoints.join(", "));
            }
        }
    }

    Ok(SUCCESS)
}
