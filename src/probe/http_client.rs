use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{RequestBuilder, Response};

use super::*;

/// Client for probing: redirects are never followed and every request is bounded
/// by `request_timeout`.
pub fn build_client(request_timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(request_timeout)
        .build()
        .context("build http client")
}

impl ProbeRunner<'_> {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.strip_prefix('/').unwrap_or(path))
    }

    pub(super) fn request(&self, method: ProbeMethod, path: &str) -> RequestBuilder {
        let url = self.url(path);
        match method {
            ProbeMethod::Get => self.client.get(url),
            ProbeMethod::Head => self.client.head(url),
            ProbeMethod::Post => self.client.post(url).form(&[("key", "value")]),
        }
    }

    /// Send one probe and judge it. Transport errors become outcomes, never `Err`.
    pub(super) fn probe(
        &self,
        check: CheckKind,
        method: ProbeMethod,
        path: &str,
        expect: &Expectation,
    ) -> ProbeResult {
        let outcome = match self.request(method, path).send().and_then(observe) {
            Ok(observed) => evaluate(expect, &observed),
            Err(err) => ProbeOutcome::TransportError {
                message: transport_message(&err),
            },
        };

        let result = ProbeResult {
            check,
            method,
            path: path.to_string(),
            outcome,
        };
        match &result.outcome {
            ProbeOutcome::Pass => tracing::debug!(%check, "{}", result),
            ProbeOutcome::Fail { .. } => tracing::warn!(%check, "{}", result),
            ProbeOutcome::TransportError { .. } => tracing::warn!(%check, "{}", result),
        }
        result
    }
}

fn observe(resp: Response) -> reqwest::Result<Observed> {
    let status = resp.status().as_u16();
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let body = resp.bytes()?;
    Ok(Observed {
        status,
        body_len: body.len(),
        location,
    })
}

fn transport_message(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_body() || err.is_decode() {
        "reading body failed"
    } else {
        "request failed"
    };

    let mut message = kind.to_string();
    let mut source: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}
