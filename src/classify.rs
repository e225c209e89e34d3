//! Turns a raw HTTP response into one of a fixed set of outcomes.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::Error;
use crate::transport::RawResponse;

/// Which lookup produced the response. Only commit listings may report an empty repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    RepoList,
    CommitList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx with a parsed JSON body (`Null` when the body was empty).
    Success(Value),
    /// 409 "Git Repository is empty." from the commits endpoint.
    EmptyResource,
    /// Quota exhausted. `hint` is a human-readable wait estimate when the server gave one.
    RateLimited { hint: Option<String> },
    HardError { status: u16, detail: String },
}

impl Outcome {
    /// Fold into the caller's view: the payload on success, `None` for an empty
    /// repository, and the matching [`Error`] for everything else.
    pub fn into_result(self) -> Result<Option<Value>, Error> {
        match self {
            Outcome::Success(value) => Ok(Some(value)),
            Outcome::EmptyResource => Ok(None),
            Outcome::RateLimited { hint } => Err(Error::RateLimitExceeded { hint }),
            Outcome::HardError { status, detail } => Err(Error::RemoteHardError { status, detail }),
        }
    }
}

const CONFLICT: u16 = 409;

/// Classify `resp` as returned by `endpoint`.
///
/// Only a success status whose body is not valid JSON is an error here; every other
/// response maps to an [`Outcome`]. `now` is used for the rate-limit reset hint.
pub fn classify(endpoint: Endpoint, resp: &RawResponse, now: SystemTime) -> Result<Outcome, Error> {
    let status = resp.status;
    let parsed = parse_body(&resp.body);

    if (200..300).contains(&status) {
        return match parsed {
            Some(Ok(value)) => Ok(Outcome::Success(value)),
            None => Ok(Outcome::Success(Value::Null)),
            Some(Err(e)) => Err(Error::MalformedResponseShape(format!(
                "response body is not JSON: {e}"
            ))),
        };
    }

    let parsed = parsed.and_then(Result::ok);
    let detail = match &parsed {
        Some(value) => value.to_string(),
        None => resp.text(),
    };

    if status == CONFLICT && endpoint == Endpoint::CommitList && is_empty_repo(parsed.as_ref(), &detail)
    {
        return Ok(Outcome::EmptyResource);
    }

    if is_rate_limited(resp, &detail) {
        return Ok(Outcome::RateLimited {
            hint: reset_hint(resp, now),
        });
    }

    Ok(Outcome::HardError { status, detail })
}

/// `None` for an empty (or whitespace-only) body.
fn parse_body(body: &[u8]) -> Option<Result<Value, serde_json::Error>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(serde_json::from_slice(body))
}

fn is_empty_repo(parsed: Option<&Value>, detail: &str) -> bool {
    let message = parsed
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(detail);
    message.to_lowercase().contains("is empty")
}

fn is_rate_limited(resp: &RawResponse, detail: &str) -> bool {
    if !matches!(resp.status, 403 | 429) {
        return false;
    }
    let exhausted = resp
        .header("x-ratelimit-remaining")
        .is_some_and(|v| v.trim() == "0");
    // Secondary rate limits don't always zero the counter but say so in the message.
    exhausted || detail.to_lowercase().contains("rate limit")
}

fn reset_hint(resp: &RawResponse, now: SystemTime) -> Option<String> {
    let header_secs = |name: &str| resp.header(name).and_then(|v| v.trim().parse::<u64>().ok());

    if let Some(reset_at) = header_secs("x-ratelimit-reset") {
        let now = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        return Some(match reset_at.saturating_sub(now) {
            0 => "resets now".to_string(),
            secs => format!("resets in {}", format_wait(secs)),
        });
    }

    header_secs("retry-after").map(|secs| format!("retry after {}", format_wait(secs)))
}

fn format_wait(secs: u64) -> String {
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => format!("{}m {}s", secs / 60, secs % 60),
        _ => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
    }
}
