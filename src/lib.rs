//! MP3 Tag Tree Library
//!
//! This library lists and rewrites ID3 tags for every MP3 file below a
//! directory. Album, artist and year can be pinned explicitly or derived from
//! the names of the directories that contain each file, counted from the leaf
//! upwards.
//!
//! # Modules
//!
//! - `cli` - Per-command orchestration for `list-tags` and `set-tags`
//! - `config` - Configuration management and environment variables
//! - `error` - The error kinds a walk can end with
//! - `report` - The logging capability handed to every command
//! - `resolver` - Path-derived tag resolution
//! - `store` - Read/write access to one file's tag container
//! - `types` - Data structures and type definitions
//! - `walker` - Recursive discovery of MP3 files
//!
//! # Example
//!
//! ```
//! use tagwalk::{cli, config::SetConfig, report::Console, store::Id3Store, walker::OsFilesystem};
//!
//! fn main() -> tagwalk::Result<()> {
//!     let config = SetConfig { album_index: -1, ..SetConfig::default() };
//!     let summary = cli::set_tags(&OsFilesystem, &Id3Store::default(), ".", &config, &Console::new(false))?;
//!     println!("{} files tagged", summary.tagged);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod resolver;
pub mod store;
pub mod types;
pub mod walker;

pub use error::{Result, TagError};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Scanning {}", root.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Tagged {} files", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses it, once a
/// fatal [`TagError`] has ended the walk.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message.
///
/// # Example
///
/// ```
/// error!("{}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues that don't require program termination.
///
/// # Example
///
/// ```
/// warning!("No .env file found, using defaults");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
