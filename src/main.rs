//! TAXII command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags + config file
//!          │
//!          ▼
//!   ┌──────────────┐     ┌──────────────┐     ┌────────────────┐
//!   │   Settings   │────▶│  transport   │────▶│ ExchangeClient │──── HTTP POST ───▶ service
//!   │ (cli/config) │     │   builder    │     │   serialize    │
//!   └──────────────┘     └──────────────┘     │   classify     │◀─── XML reply ────
//!                                             └───────┬────────┘
//!                                                     │
//!                                                     ▼
//!                                           Reporter (XML or text)
//! ```
//!
//! Any failure is printed to stdout and the process exits with status 1.

use clap::Parser;

use taxii_client::cli::{run, Cli};
use taxii_client::observability::logging;
use taxii_client::ClientError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        println!("{}", e);
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<(), ClientError> {
    let file = cli.load_file()?;
    let settings = cli.settings(&file)?;

    logging::init_logging(settings.verbose);
    tracing::debug!(config = ?cli.config, "Settings resolved");

    run(&settings).await?;
    Ok(())
}
