use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use llemming::analysis::timings;
use llemming::cli::{self, Cli};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "llemming=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    let result = cli::run(args).await;

    let report = timings::summary();
    if !report.is_empty() {
        eprint!("{report}");
    }

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
