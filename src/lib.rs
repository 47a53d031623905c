//! # npm-publish Library
//!
//! Check-then-publish workflow for npm packages: query the registry for the
//! version declared in `package.json`, skip when it is already there, publish
//! otherwise.

use clap::{Args, Parser};
use std::path::PathBuf;

pub mod commands;
pub mod config;
pub mod constants;
pub mod logger;
pub mod manifest;
pub mod outcome;
pub mod publisher;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod workflow;

/// Publish an npm package unless its current version is already in the registry
///
/// Reads `name` and `version` from `package.json` in the working directory,
/// asks the registry whether that exact version exists and runs `npm publish`
/// only when it does not (or when `--force` is given).
#[derive(Parser, Debug)]
#[command(
    name = "npm-publish",
    version,
    about = "Publish an npm package only when its version is not in the registry yet",
    long_about = "Reads the package name and version from package.json, checks the registry for that exact version \
and runs `npm publish` when it is missing.\n\nExit codes: 0 when the package is up to date or was published, \
255 (-1) on any failure."
)]
pub struct Cli {
    #[command(flatten)]
    pub publish: PublishArgs,

    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

/// Options of the default publish workflow
#[derive(Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// Override default registry
    #[arg(short, long)]
    pub registry: Option<String>,

    /// Publish under the given distribution tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Force publication even if the version already exists
    #[arg(short, long)]
    pub force: bool,

    /// Test publication process without touching the registry
    #[arg(short, long)]
    pub dry_run: bool,

    /// Disable log output
    #[arg(short, long)]
    pub silent: bool,

    /// Package directory (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
