//! Logging capability handed to each command.
//!
//! Commands never print log lines themselves; they call a [`Reporter`]. The
//! terminal uses [`Console`], tests swap in their own implementation.

use colored::Colorize;

use crate::{info, success, warning};

pub trait Reporter {
    /// Per-item progress, only interesting with `--verbose`.
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    /// A failure that does not end the run.
    fn error(&self, message: &str);
}

/// Colored terminal output in the same `[x] message` shape as the crate macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbose: bool,
}

impl Console {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for Console {
    fn debug(&self, message: &str) {
        if self.verbose {
            println!("[{}] {}", "·".dimmed(), message.dimmed());
        }
    }

    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn success(&self, message: &str) {
        success!("{}", message);
    }

    fn warning(&self, message: &str) {
        warning!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("[{}] {}", "!".red().bold(), message);
    }
}
