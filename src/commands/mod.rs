use clap::Subcommand;

use crate::logger;
use crate::Cli;

pub mod completions;
pub mod publish;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

/// Run the requested command and return the process exit code
///
/// Without a subcommand the check-then-publish workflow runs.
pub async fn run(cli: Cli) -> i32 {
    match cli.cmd {
        Some(Commands::Completions { shell }) => {
            let log = logger::create(cli.publish.silent);
            completions::run(shell, log.as_ref())
        }
        None => publish::run(cli.publish).await,
    }
}
