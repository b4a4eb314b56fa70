use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A path the server must answer with `301 Moved Permanently` and this `Location`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedRedirect {
    pub path: String,
    pub location: String,
}

impl ExpectedRedirect {
    pub fn new(path: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            location: location.into(),
        }
    }
}

/// The fixed table of paths a server under test is probed with.
///
/// Every path belongs to exactly one of the three sets. The table cannot be
/// mutated once built, so a run always sees the same paths in the same order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct ExpectationTable {
    resources: Vec<String>,
    redirects: Vec<ExpectedRedirect>,
    nonexistent: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawTable {
    #[serde(default)]
    resources: Vec<String>,
    #[serde(default)]
    redirects: Vec<ExpectedRedirect>,
    #[serde(default)]
    nonexistent: Vec<String>,
}

impl TryFrom<RawTable> for ExpectationTable {
    type Error = anyhow::Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        ExpectationTable::new(raw.resources, raw.redirects, raw.nonexistent)
    }
}

impl From<ExpectationTable> for RawTable {
    fn from(table: ExpectationTable) -> Self {
        RawTable {
            resources: table.resources,
            redirects: table.redirects,
            nonexistent: table.nonexistent,
        }
    }
}

impl Default for ExpectationTable {
    fn default() -> Self {
        Self {
            resources: vec![
                "/index.html".to_string(),
                "/foo/bar.html".to_string(),
                "/images/uchicago/logo.png".to_string(),
            ],
            redirects: vec![
                ExpectedRedirect::new("/cats", "http://en.wikipedia.org/wiki/Cat"),
                ExpectedRedirect::new("/uchicago/cs", "http://www.cs.uchicago.edu/"),
            ],
            nonexistent: vec![
                "/stuff.html".to_string(),
                "/foo".to_string(),
                "/images/uchicago/log.png".to_string(),
            ],
        }
    }
}

impl ExpectationTable {
    pub fn new(
        resources: Vec<String>,
        redirects: Vec<ExpectedRedirect>,
        nonexistent: Vec<String>,
    ) -> Result<Self> {
        let table = Self {
            resources,
            redirects,
            nonexistent,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read expectations {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse expectations {}", path.display()))
    }

    /// Paths expected to be served with `200 OK`.
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn redirects(&self) -> &[ExpectedRedirect] {
        &self.redirects
    }

    /// Paths expected to be answered with `404 Not Found`.
    pub fn nonexistent(&self) -> &[String] {
        &self.nonexistent
    }

    fn validate(&self) -> Result<()> {
        if self.resources.is_empty() && self.redirects.is_empty() && self.nonexistent.is_empty() {
            anyhow::bail!("expectation table has no paths");
        }

        let mut seen: HashSet<&str> = HashSet::new();

        let sets: [(&str, Vec<&str>); 3] = [
            ("resources", self.resources.iter().map(String::as_str).collect()),
            (
                "redirects",
                self.redirects.iter().map(|r| r.path.as_str()).collect(),
            ),
            (
                "nonexistent",
                self.nonexistent.iter().map(String::as_str).collect(),
            ),
        ];

        for (set, paths) in sets {
            for path in paths {
                if !path.starts_with('/') {
                    anyhow::bail!("{} path {:?} must start with '/'", set, path);
                }
                if path.starts_with("//") {
                    anyhow::bail!("{} path {:?} must start with a single '/'", set, path);
                }
                if !seen.insert(path) {
                    anyhow::bail!("path {:?} appears more than once ({})", path, set);
                }
            }
        }

        for r in &self.redirects {
            if r.location.trim().is_empty() {
                anyhow::bail!("redirect {:?} has an empty location", r.path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/model/expectations_tests.rs"]
mod tests;
