use serde::Serialize;

use crate::probe::{ProbeOutcome, ProbeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub transport_errors: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.transport_errors
    }
}

/// Every probe result of one run, in the order the probes were issued.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    results: Vec<ProbeResult>,
}

impl RunReport {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        Self { results }
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = ProbeResult>) {
        self.results.extend(results);
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn tally(&self) -> Tally {
        let mut t = Tally::default();
        for r in &self.results {
            match r.outcome {
                ProbeOutcome::Pass => t.passed += 1,
                ProbeOutcome::Fail { .. } => t.failed += 1,
                ProbeOutcome::TransportError { .. } => t.transport_errors += 1,
            }
        }
        t
    }

    /// True when no probe failed or errored.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_pass())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.outcome.is_pass())
    }

    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = self.failures().map(|r| r.to_string()).collect();
        let t = self.tally();
        lines.push(format!(
            "checks: {} passed, {} failed, {} transport errors",
            t.passed, t.failed, t.transport_errors
        ));
        lines.join("\n")
    }
}

impl Serialize for RunReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            success: bool,
            #[serde(flatten)]
            tally: Tally,
            results: &'a [ProbeResult],
        }

        Wire {
            success: self.is_success(),
            tally: self.tally(),
            results: &self.results,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
