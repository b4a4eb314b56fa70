use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use http_conformance::model::{
    DEFAULT_HOST, DEFAULT_LAUNCHER, DEFAULT_READY_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
    DEFAULT_SERVER_CLASS, DEFAULT_SERVER_PORT, ExpectationTable, HarnessConfig,
};
use http_conformance::{harness, logging};

#[derive(Parser)]
#[command(name = "http-conformance")]
#[command(about = "Launch an HTTP server and probe it against a fixed expectation table", long_about = None)]
struct Cli {
    /// Server class or binary to launch
    #[arg(long, default_value = DEFAULT_SERVER_CLASS)]
    server_class: String,

    /// Port the server is told to listen on
    #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
    server_port: u16,

    /// Program used to run the server class (empty runs the class directly)
    #[arg(long, default_value = DEFAULT_LAUNCHER)]
    launcher: String,

    /// Host the probes connect to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Maximum time to wait for the server to accept connections
    #[arg(long, default_value_t = DEFAULT_READY_TIMEOUT_MS)]
    ready_timeout_ms: u64,

    /// Per-request timeout
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    request_timeout_ms: u64,

    /// JSON file with the expectation table (defaults to the built-in table)
    #[arg(long)]
    expectations: Option<PathBuf>,

    /// Emit the run report as JSON
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let table = match &cli.expectations {
        Some(path) => ExpectationTable::from_json_file(path)?,
        None => ExpectationTable::default(),
    };

    let config = HarnessConfig {
        server_class: cli.server_class,
        server_port: cli.server_port,
        launcher: Some(cli.launcher).filter(|l| !l.is_empty()),
        host: cli.host,
        ready_timeout: Duration::from_millis(cli.ready_timeout_ms),
        request_timeout: Duration::from_millis(cli.request_timeout_ms),
    };

    let report = harness::run(&config, &table)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report json")?
        );
    } else {
        println!("{}", report.render_text());
    }

    Ok(report.is_success())
}
