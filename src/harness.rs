use anyhow::Result;

use crate::launcher;
use crate::model::{ExpectationTable, HarnessConfig};
use crate::probe::{ProbeRunner, build_client};
use crate::report::RunReport;

/// Launch the server, run the full probe battery, and stop the server.
///
/// The server handle lives on this stack frame, so it is terminated on every
/// return path, including a failure to build the HTTP client or a panic inside
/// a probe.
pub fn run(config: &HarnessConfig, table: &ExpectationTable) -> Result<RunReport> {
    let mut server = launcher::start(
        &config.server_command(),
        &config.host,
        config.server_port,
        config.ready_timeout,
    );

    let client = build_client(config.request_timeout)?;
    let runner = ProbeRunner::new(client, config.base_url(), table);
    let report = runner.run_all();

    server.terminate();

    let tally = report.tally();
    tracing::info!(
        passed = tally.passed,
        failed = tally.failed,
        transport_errors = tally.transport_errors,
        "run finished"
    );
    Ok(report)
}
