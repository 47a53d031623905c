//! Console output for the publish workflow
//!
//! The logger is picked once from the `--silent` flag and handed down to
//! every step, so nothing below `main` decides whether to print.

/// Sink for user-facing messages
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes info to stdout and errors to stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Drops every message
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

pub fn create(silent: bool) -> Box<dyn Logger> {
    if silent {
        Box::new(SilentLogger)
    } else {
        Box::new(ConsoleLogger)
    }
}
