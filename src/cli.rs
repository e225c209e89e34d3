use clap::Parser;

use crate::transport::API_BASE;

#[derive(Parser, Debug)]
#[command(
    name = "repocount",
    about = "List a GitHub account's repositories with their commit counts",
    version,
    arg_required_else_help = true,
    after_help = "Set GITHUB_TOKEN to raise the API rate limit (5 000/hr vs 60/hr)."
)]
pub struct Args {
    /// GitHub account (user or organization) whose repositories are listed
    pub account: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Base URL of the GitHub REST API (for GitHub Enterprise or testing)
    #[arg(long, default_value = API_BASE)]
    pub api_url: String,
}
