//! Report pipeline: list the account's repositories, count commits in each, sort.

use std::fmt;

use crate::error::Error;
use crate::github;
use crate::transport::{Transport, TransportConfig, TransportContext};
use crate::types::ReportConfig;

/// One repository and its commit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub commits: usize,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repo: {}  Number of commits: {}", self.name, self.commits)
    }
}

/// Runs the report for `config.account` over a fresh [`TransportContext`].
pub async fn run(config: &ReportConfig) -> Result<Vec<ReportRow>, Error> {
    let start = std::time::Instant::now();
    let rows = generate(&config.account, None, &config.transport).await?;
    tracing::info!(
        account = %config.account,
        repos = rows.len(),
        elapsed = %elapsed_str(start.elapsed()),
        "report complete"
    );
    Ok(rows)
}

/// Build the report, using `transport` when given and otherwise a context built from `config`.
///
/// A caller-supplied transport is used as is. A context built here lives only for this call.
pub async fn generate(
    account: &str,
    transport: Option<&dyn Transport>,
    config: &TransportConfig,
) -> Result<Vec<ReportRow>, Error> {
    match transport {
        Some(transport) => collect_rows(account, transport).await,
        None => {
            let context = TransportContext::new(config)?;
            collect_rows(account, &context).await
        }
    }
}

/// Fetch the repository list, then each repository's commits, one request at a time.
///
/// Any failure aborts the whole report; no partial rows are returned.
pub async fn collect_rows(account: &str, transport: &dyn Transport) -> Result<Vec<ReportRow>, Error> {
    if account.is_empty() {
        return Err(Error::EmptyAccount);
    }

    let names = github::list_repo_names(transport, account).await?;
    tracing::debug!(account, repos = names.len(), "listed repositories");

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let commits = github::count_commits(transport, account, &name).await?;
        rows.push(ReportRow { name, commits });
    }

    sort_rows(&mut rows);
    Ok(rows)
}

/// Sort by name, ignoring case. Stable, so equal names keep their discovery order.
pub fn sort_rows(rows: &mut [ReportRow]) {
    rows.sort_by_cached_key(|row| row.name.to_lowercase());
}

fn elapsed_str(d: std::time::Duration) -> String {
    if d.as_millis() < 1000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
