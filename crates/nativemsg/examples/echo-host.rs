//! Native-messaging host that echoes every message back to the extension.
//!
//! Register this binary in a browser host manifest, then send it JSON from
//! the extension. Logs go to stderr; stdout carries frames only.
//!
//! Environment:
//! - `NATIVEMSG_BYTE_ORDER`: `native` (default), `big` or `little`
//! - `NATIVEMSG_LOG`: tracing filter directive, default `info`

use std::process::ExitCode;

use nativemsg::{ByteOrder, Channel, FrameError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Echo {
    seq: u64,
    echo: serde_json::Value,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NATIVEMSG_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn byte_order_from_env() -> Result<ByteOrder, String> {
    match std::env::var("NATIVEMSG_BYTE_ORDER") {
        Ok(value) => value.parse().map_err(|err| format!("{err}")),
        Err(_) => Ok(ByteOrder::Native),
    }
}

fn run(order: ByteOrder) -> Result<u64, FrameError> {
    let mut channel = Channel::stdio(order);
    let mut seq = 0u64;

    loop {
        let message: serde_json::Value = match channel.recv() {
            Ok(message) => message,
            Err(err) if err.is_closed() => return Ok(seq),
            Err(err) => return Err(err),
        };

        seq += 1;
        let written = channel.send(&Echo { seq, echo: message })?;
        tracing::debug!(seq, bytes = written, "echoed message");
    }
}

fn main() -> ExitCode {
    init_logging();

    let order = match byte_order_from_env() {
        Ok(order) => order,
        Err(err) => {
            tracing::error!(error = %err, "invalid NATIVEMSG_BYTE_ORDER");
            return ExitCode::from(2);
        }
    };
    tracing::info!(byte_order = %order, "echo host started");

    match run(order) {
        Ok(count) => {
            tracing::info!(messages = count, "extension closed the connection");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "echo host stopped");
            ExitCode::FAILURE
        }
    }
}
