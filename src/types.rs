use crate::transport::TransportConfig;

/// Configuration for a `repocount` run, assembled once by the entry point.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// GitHub account whose repositories are listed.
    pub account: String,
    pub transport: TransportConfig,
}

