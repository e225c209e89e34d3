use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Usage errors exit with status 2 from inside clap.
    let args = repocount::cli::Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repocount=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = repocount::types::ReportConfig {
        account: args.account,
        transport: repocount::transport::TransportConfig {
            api_base: args.api_url,
            token: std::env::var("GITHUB_TOKEN").ok(),
            timeout: Duration::from_secs(args.timeout),
            ..Default::default()
        },
    };

    match repocount::report::run(&config).await {
        Ok(rows) => rows.iter().for_each(|row| println!("{row}")),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
