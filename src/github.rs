//! GitHub REST API v3 lookups used by the report.
//!
//! Both lookups fetch a single page of at most [`PER_PAGE`] items; nothing follows
//! `Link: rel="next"`, so accounts or repositories beyond that size under-report.

use std::time::SystemTime;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::classify::{Endpoint, classify};
use crate::error::Error;
use crate::transport::Transport;

/// GitHub's maximum page size.
pub const PER_PAGE: usize = 100;

// ── Response types ─────────────────────────────────────────────────────────────

/// One element of `GET /users/{account}/repos`.
///
/// Every field but `name` is ignored. A missing, null, non-string or empty name decodes
/// to `None`; such entries are skipped rather than rejected.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct RepoEntry {
    #[serde(default, deserialize_with = "usable_name")]
    pub name: Option<String>,
}

fn usable_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .filter(|name| !name.is_empty())
        .map(str::to_string))
}

// ── Paths ──────────────────────────────────────────────────────────────────────

// Names are percent-encoded so `#`, `?` or `/` can't redirect the request elsewhere.
pub fn repos_path(account: &str) -> String {
    let account = urlencoding::encode(account);
    format!("/users/{account}/repos?per_page={PER_PAGE}")
}

pub fn commits_path(account: &str, repo: &str) -> String {
    let account = urlencoding::encode(account);
    let repo = urlencoding::encode(repo);
    format!("/repos/{account}/{repo}/commits?per_page={PER_PAGE}")
}

// ── Lookups ────────────────────────────────────────────────────────────────────

/// Names of the account's repositories, in the order GitHub listed them.
pub async fn list_repo_names(
    transport: &dyn Transport,
    account: &str,
) -> Result<Vec<String>, Error> {
    let resp = transport.get(&repos_path(account)).await?;
    // Listings never classify as an empty repository, so `None` cannot reach the decode.
    let payload = classify(Endpoint::RepoList, &resp, SystemTime::now())?
        .into_result()?
        .unwrap_or(Value::Null);
    let entries = decode_repo_list(payload)?;

    let total = entries.len();
    let names: Vec<String> = entries.into_iter().filter_map(|e| e.name).collect();
    if names.len() < total {
        tracing::debug!(
            skipped = total - names.len(),
            "ignoring repository entries without a name"
        );
    }
    Ok(names)
}

fn decode_repo_list(payload: Value) -> Result<Vec<RepoEntry>, Error> {
    serde_json::from_value(payload)
        .map_err(|e| Error::MalformedResponseShape(format!("repository list: {e}")))
}

/// Number of commits on the first page of `account/repo`.
///
/// An empty repository counts as zero, as does a successful reply that isn't a JSON array.
pub async fn count_commits(
    transport: &dyn Transport,
    account: &str,
    repo: &str,
) -> Result<usize, Error> {
    let resp = transport.get(&commits_path(account, repo)).await?;
    let payload = classify(Endpoint::CommitList, &resp, SystemTime::now())?.into_result()?;
    let count = match payload {
        Some(Value::Array(commits)) => commits.len(),
        Some(other) => {
            tracing::debug!(repo, kind = json_kind(&other), "commit list is not an array");
            0
        }
        None => {
            tracing::debug!(repo, "repository is empty");
            0
        }
    };
    Ok(count)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
