use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::{self, Write};

use crate::logger::Logger;
use crate::Cli;

pub fn run(shell: String, log: &dyn Logger) -> i32 {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = io::stdout();
    match shell.as_str() {
        "bash" => generate(Bash, &mut cmd, name, &mut out),
        "zsh" => generate(Zsh, &mut cmd, name, &mut out),
        "fish" => generate(Fish, &mut cmd, name, &mut out),
        other => {
            log.error(&format!(
                "unsupported shell '{}', choose: bash, zsh, fish",
                other
            ));
            return 1;
        }
    }
    // process::exit does not flush stdout
    if let Err(e) = out.flush() {
        log.error(&format!("failed to write completions: {}", e));
        return 1;
    }
    0
}
