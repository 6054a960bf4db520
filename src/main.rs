//! depscan - outdated npm dependency scanner CLI tool
//!
//! Prints one line per `package.json` found under the scan root:
//! ` 3 updates available for project/sub`

use clap::Parser;
use depscan::cancel::CancelToken;
use depscan::cli::CliArgs;
use depscan::logging;
use depscan::orchestrator::Orchestrator;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error};

/// Exit status after an interrupt (128 + SIGINT)
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    logging::init(args.verbose, args.quiet);

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, cancelling scan");
                cancel.cancel();
            }
        });
    }

    // Run the main logic and handle errors
    match run(args, cancel).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs, cancel: CancelToken) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("depscan v{}", env!("CARGO_PKG_VERSION"));
    }

    let orchestrator = Orchestrator::new(args)?;
    let mut stdout = io::stdout().lock();
    let summary = orchestrator.run(cancel, &mut stdout).await?;

    if summary.cancelled {
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
