use std::fmt;

use serde::Serialize;

use crate::model::ExpectationTable;
use crate::report::RunReport;

mod checks;
mod http_client;

pub use self::http_client::build_client;

/// Probe categories, in the order a full run executes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    ExpectedResources,
    HeadExpectedResources,
    ExpectedRedirects,
    NonexistentPaths,
    NonallowedMethods,
    HeadWorksSame,
}

impl CheckKind {
    pub const RUN_ORDER: [CheckKind; 6] = [
        CheckKind::ExpectedResources,
        CheckKind::HeadExpectedResources,
        CheckKind::ExpectedRedirects,
        CheckKind::NonexistentPaths,
        CheckKind::NonallowedMethods,
        CheckKind::HeadWorksSame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::ExpectedResources => "expected_resources",
            CheckKind::HeadExpectedResources => "head_expected_resources",
            CheckKind::ExpectedRedirects => "expected_redirects",
            CheckKind::NonexistentPaths => "nonexistent_paths",
            CheckKind::NonallowedMethods => "nonallowed_methods",
            CheckKind::HeadWorksSame => "head_works_same",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeMethod {
    Get,
    Head,
    Post,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeMethod::Get => "GET",
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Post => "POST",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRule {
    Any,
    Empty,
    NonEmpty,
}

impl BodyRule {
    fn accepts(self, body_len: usize) -> bool {
        match self {
            BodyRule::Any => true,
            BodyRule::Empty => body_len == 0,
            BodyRule::NonEmpty => body_len > 0,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            BodyRule::Any => "any body",
            BodyRule::Empty => "empty body",
            BodyRule::NonEmpty => "non-empty body",
        }
    }
}

/// What a single probe requires of the response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Expectation {
    pub status: u16,
    pub body: BodyRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Expectation {
    pub fn status(status: u16, body: BodyRule) -> Self {
        Self {
            status,
            body,
            location: None,
        }
    }

    pub fn redirect(location: impl Into<String>, body: BodyRule) -> Self {
        Self {
            status: 301,
            body,
            location: Some(location.into()),
        }
    }
}

/// The parts of a response the harness asserts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observed {
    pub status: u16,
    pub body_len: usize,
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Pass,
    Fail { discrepancies: Vec<Discrepancy> },
    TransportError { message: String },
}

impl ProbeOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, ProbeOutcome::Pass)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub check: CheckKind,
    pub method: ProbeMethod,
    pub path: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Pass => write!(f, "PASS {} {}", self.method, self.path),
            ProbeOutcome::Fail { discrepancies } => {
                let parts: Vec<String> = discrepancies.iter().map(|d| d.to_string()).collect();
                write!(f, "FAIL {} {}: {}", self.method, self.path, parts.join("; "))
            }
            ProbeOutcome::TransportError { message } => {
                write!(f, "ERROR {} {}: {}", self.method, self.path, message)
            }
        }
    }
}

/// Compare a response against an expectation, reporting every mismatch.
pub fn evaluate(expect: &Expectation, observed: &Observed) -> ProbeOutcome {
    let mut discrepancies = Vec::new();

    if observed.status != expect.status {
        discrepancies.push(Discrepancy {
            field: "status",
            expected: expect.status.to_string(),
            actual: observed.status.to_string(),
        });
    }

    if !expect.body.accepts(observed.body_len) {
        discrepancies.push(Discrepancy {
            field: "body",
            expected: expect.body.describe().to_string(),
            actual: format!("{} bytes", observed.body_len),
        });
    }

    if let Some(location) = &expect.location {
        if observed.location.as_deref() != Some(location.as_str()) {
            discrepancies.push(Discrepancy {
                field: "location",
                expected: location.clone(),
                actual: observed
                    .location
                    .clone()
                    .unwrap_or_else(|| "<missing>".to_string()),
            });
        }
    }

    if discrepancies.is_empty() {
        ProbeOutcome::Pass
    } else {
        ProbeOutcome::Fail { discrepancies }
    }
}

/// Issues the probe battery against one server.
///
/// Each check runs every one of its probes even when earlier ones fail.
pub struct ProbeRunner<'a> {
    client: reqwest::blocking::Client,
    base_url: String,
    table: &'a ExpectationTable,
}

impl<'a> ProbeRunner<'a> {
    pub fn new(
        client: reqwest::blocking::Client,
        base_url: impl Into<String>,
        table: &'a ExpectationTable,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn run_check(&self, check: CheckKind) -> Vec<ProbeResult> {
        match check {
            CheckKind::ExpectedResources => self.check_expected_resources(),
            CheckKind::HeadExpectedResources => self.check_head_expected_resources(),
            CheckKind::ExpectedRedirects => self.check_expected_redirects(),
            CheckKind::NonexistentPaths => self.check_nonexistent_paths(),
            CheckKind::NonallowedMethods => self.check_nonallowed_methods(),
            CheckKind::HeadWorksSame => self.check_head_works_same(),
        }
    }

    /// Run every check in `CheckKind::RUN_ORDER`.
    pub fn run_all(&self) -> RunReport {
        let mut report = RunReport::default();
        for check in CheckKind::RUN_ORDER {
            tracing::info!(%check, "running check");
            report.extend(self.run_check(check));
        }
        report
    }
}

#[cfg(test)]
#[path = "tests/probe_tests.rs"]
mod tests;
