use std::fs;

use serde::Serialize;
use tracing::info;
use xsprims_io::Channel;
use xsprims_transport::{HandleConfig, XsHandle};

use crate::cmd::{candidate_endpoints, parse_duration, ExchangeArgs};
use crate::exit::{channel_error, io_error, transport_error, CliResult, SUCCESS};
use crate::output::{payload_preview, print_json, print_raw, print_table, OutputFormat};
use crate::settings::Settings;

#[derive(Debug, Serialize)]
struct ExchangeOutput {
    endpoint_kind: &'static str,
    bytes_sent: u64,
    bytes_received: u64,
    reply: String,
}

pub fn run(args: ExchangeArgs, format: OutputFormat, settings: &Settings) -> CliResult<i32> {
    let timeout = args.timeout.as_deref().map(parse_duration).transpose()?;
    let config = HandleConfig {
        read_timeout: timeout,
        write_timeout: timeout,
    };
    let payload = resolve_payload(&args)?;

    let candidates = candidate_endpoints(args.path.clone(), settings);
    let handle = XsHandle::open_first(&candidates, &config)
        .map_err(|err| transport_error("open failed", err))?;
    let kind = handle.kind();

    let mut channel = Channel::new(handle);
    channel
        .send(&payload)
        .map_err(|err| channel_error("send failed", err))?;
    let reply = channel
        .recv(args.read)
        .map_err(|err| channel_error("receive failed", err))?;
    info!(
        sent = channel.bytes_sent(),
        received = channel.bytes_received(),
        "exchange complete"
    );

    let output = ExchangeOutput {
        endpoint_kind: kind.as_str(),
        bytes_sent: channel.bytes_sent(),
        bytes_received: channel.bytes_received(),
        reply: payload_preview(&reply),
    };
    channel
        .into_inner()
        .close()
        .map_err(|err| transport_error("close failed", err))?;

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => print_table(
            &["ENDPOINT", "SENT", "RECEIVED", "REPLY"],
            vec![vec![
                output.endpoint_kind.to_string(),
                output.bytes_sent.to_string(),
                output.bytes_received.to_string(),
                output.reply.clone(),
            ]],
        ),
        OutputFormat::Pretty => println!(
            "endpoint={} sent={} received={} reply={}",
            output.endpoint_kind, output.bytes_sent, output.bytes_received, output.reply
        ),
        OutputFormat::Raw => print_raw(&reply),
    }

    Ok(SUCCESS)
}

fn resolve_payload(args: &ExchangeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}
