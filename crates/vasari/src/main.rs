//! Vasari CLI binary.
//!
//! This binary provides command-line access to Vasari's functionality:
//! - Publish new posts and repost existing ones
//! - Inspect the post ledger
//! - Check that Instagram credentials are configured

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run};

    // Credentials usually live in .env during development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    vasari::telemetry::init_console_telemetry(cli.verbose)?;

    run(cli).await?;

    Ok(())
}
