//! Report platform CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Load configuration**: read `.env` if present, then resolve the backend
//!    base URL from `--base-url` or `REPORT_API_BASE_URL` (clap reads both),
//!    falling back to `http://localhost:8000/api`.
//! 2. **Wire observability**: install `tracing-subscriber` on stderr with an
//!    `EnvFilter` (`RUST_LOG`, default `info`), plain or JSON formatted.
//! 3. **Construct infrastructure**: build one [`ReportApiClient`].
//! 4. **Dispatch**: run the selected subcommand and print its result as JSON
//!    on stdout. Failures go to stderr with a non-zero exit code.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use report_api::{ApiConfig, ReportApiClient, BASE_URL_ENV};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Command-line client for the report platform backend.
#[derive(Parser, Debug)]
#[clap(name = "report-cli")]
#[clap(about = "Manage reports and run AI report generation against the report backend", long_about = None)]
struct Args {
    /// Backend API root
    #[clap(long, env = BASE_URL_ENV, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Emit logs as JSON lines
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(subcommand)]
    command: Command,
}

impl Args {
    /// The flag and the environment variable both land in `base_url`.
    fn api_config(&self) -> ApiConfig {
        ApiConfig::from_lookup(|_| self.base_url.clone())
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = args.api_config();
    tracing::debug!(base_url = config.base_url(), "backend configured");
    let client = ReportApiClient::new(config);

    match commands::run(&client, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
