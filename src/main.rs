//! # npm-publish
//!
//! Publishes the npm package in the current directory unless the version in
//! its `package.json` is already in the registry.
//!
//! ```bash
//! # Publish if needed
//! npm-publish
//!
//! # Publish a prerelease under the `next` tag on a private registry
//! npm-publish --tag next --registry http://localhost:4873
//!
//! # Try it without touching the registry
//! npm-publish --dry-run
//! ```
//!
//! Set `RUST_LOG=debug` to trace the commands that are run.

use clap::Parser;
use npm_publish::{commands, Cli};
use tracing_subscriber::EnvFilter;

/// Main entry point for the npm-publish CLI
///
/// Installs diagnostics unless `--silent` is given, runs the command and
/// exits with the code it reports.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if !cli.publish.silent {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let code = commands::run(cli).await;
    std::process::exit(code);
}
