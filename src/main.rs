use std::io;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tagwalk::{
    TagError,
    cli::{self, SetSummary},
    config::{self, SetConfig, WriteVersion},
    error,
    report::{Console, Reporter},
    store::Id3Store,
    types::ListFormat,
    walker::OsFilesystem,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log every file as it is found
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the tags of every MP3 file below a path
    ListTags(ListOptions),

    /// Set title, album, artist and year for every MP3 file below a path.
    ///
    /// Index flags pick a directory name counted from the file upwards:
    /// -1 is the directory holding the file, -2 its parent, and so on.
    /// 0 (the default) leaves the field untouched unless an explicit value is given.
    SetTags(SetOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ListOptions {
    /// The path to check (defaults to the current directory)
    #[clap(long, env = config::PATH_ENV)]
    pub path: Option<String>,

    /// How to print the tags
    #[clap(long, value_enum, default_value_t = ListFormat::Records)]
    pub format: ListFormat,
}

#[derive(Args, Debug, Clone)]
pub struct SetOptions {
    /// The path to check (defaults to the current directory)
    #[clap(long, env = config::PATH_ENV)]
    pub path: Option<String>,

    /// The album of the audio files; wins over --albumIndex
    #[clap(long, default_value = "")]
    pub album: String,

    /// The year of the audio files; wins over --yearIndex
    #[clap(long, default_value = "")]
    pub year: String,

    /// The artist of the audio files; wins over --artistIndex
    #[clap(long, default_value = "")]
    pub artist: String,

    /// The path index of the album name
    #[clap(
        long = "albumIndex",
        alias = "album-index",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub album_index: i64,

    /// The path index of the year
    #[clap(
        long = "yearIndex",
        alias = "year-index",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub year_index: i64,

    /// The path index of the artist
    #[clap(
        long = "artistIndex",
        alias = "artist-index",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub artist_index: i64,

    /// ID3v2 revision to write
    #[clap(
        long = "id3-version",
        env = config::ID3_VERSION_ENV,
        value_enum,
        default_value_t = WriteVersion::Keep
    )]
    pub id3_version: WriteVersion,
}

impl SetOptions {
    fn set_config(&self) -> SetConfig {
        SetConfig {
            album: self.album.clone(),
            artist: self.artist.clone(),
            year: self.year.clone(),
            album_index: self.album_index,
            year_index: self.year_index,
            artist_index: self.artist_index,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

/// The single line shown when a fatal error ends a command.
fn failure_message(action: &str, root: &str, err: &TagError) -> String {
    match err {
        TagError::PathNotFound { .. } => err.to_string(),
        _ => format!("Failed to {} at path {}: {}", action, root, err),
    }
}

/// The closing line of a `set-tags` run and whether it counts as clean.
fn summary_message(summary: &SetSummary) -> (bool, String) {
    if summary.save_failures.is_empty() {
        (true, format!("Tagged {} files.", summary.tagged))
    } else {
        (
            false,
            format!(
                "Tagged {} files, {} could not be saved.",
                summary.tagged,
                summary.save_failures.len()
            ),
        )
    }
}

/// Splits a finished command into the value to carry on with and the
/// message of a fatal error. `Err` ends the process with exit status 1; a
/// `set-tags` run where only saves failed is still `Ok`.
fn outcome<T>(action: &str, root: &str, result: tagwalk::Result<T>) -> Result<T, String> {
    result.map_err(|e| failure_message(action, root, &e))
}

fn main() {
    let loaded_env = config::load_env();

    let cli = Cli::parse();
    let reporter = Console::new(cli.verbose);

    match loaded_env {
        Ok(Some(path)) => reporter.debug(&format!("Loaded environment from {}", path.display())),
        Ok(None) => {}
        Err(e) => warning!("Cannot load environment. Err: {}", e),
    }

    match cli.command {
        Command::ListTags(opt) => {
            let root = config::root_or_current(opt.path);
            let mut out = io::stdout().lock();

            let result = cli::list_tags(
                &OsFilesystem,
                &Id3Store::default(),
                &root,
                opt.format,
                &mut out,
                &reporter,
            );
            if let Err(message) = outcome("list tags", &root, result) {
                error!("{}", message);
            }
        }

        Command::SetTags(opt) => {
            let config = opt.set_config();
            let root = config::root_or_current(opt.path);
            let store = Id3Store::new(opt.id3_version);

            reporter.info(&format!("Setting tags below {}", root));
            let result = cli::set_tags(&OsFilesystem, &store, &root, &config, &reporter);
            let summary = match outcome("set tags", &root, result) {
                Ok(summary) => summary,
                Err(message) => error!("{}", message),
            };
            match summary_message(&summary) {
                (true, message) => reporter.success(&message),
                (false, message) => reporter.warning(&message),
            }
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut io::stdout())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["tagwalk"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn set_options(args: &[&str]) -> SetOptions {
        let mut argv = vec!["set-tags"];
        argv.extend_from_slice(args);
        match parse(&argv).command {
            Command::SetTags(opt) => opt,
            other => panic!("expected set-tags, got {:?}", other),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn camel_case_index_flags_take_negative_numbers() {
        let opt = set_options(&[
            "--path",
            "/music",
            "--albumIndex",
            "-1",
            "--yearIndex",
            "-2",
            "--artistIndex=-3",
        ]);

        let config = opt.set_config();
        assert_eq!(config.album_index, -1);
        assert_eq!(config.year_index, -2);
        assert_eq!(config.artist_index, -3);
        assert_eq!(opt.path.as_deref(), Some("/music"));
    }

    #[test]
    fn kebab_case_aliases_are_accepted() {
        let config = set_options(&[
            "--album-index",
            "-1",
            "--year-index",
            "-2",
            "--artist-index",
            "-3",
        ])
        .set_config();

        assert_eq!(
            (config.album_index, config.year_index, config.artist_index),
            (-1, -2, -3)
        );
    }

    #[test]
    fn overrides_and_version_are_parsed() {
        let opt = set_options(&[
            "--album",
            "Abbey Road",
            "--artist",
            "Beatles",
            "--year",
            "1969",
            "--id3-version",
            "2.3",
        ]);

        let config = opt.set_config();
        assert_eq!(config.album, "Abbey Road");
        assert_eq!(config.artist, "Beatles");
        assert_eq!(config.year, "1969");
        assert_eq!((config.album_index, config.year_index, config.artist_index), (0, 0, 0));
        assert_eq!(opt.id3_version, WriteVersion::V23);
    }

    #[test]
    fn list_tags_defaults_to_records_in_current_directory() {
        let Command::ListTags(opt) = parse(&["list-tags"]).command else {
            panic!("expected list-tags");
        };

        assert_eq!(opt.format, ListFormat::Records);
        if std::env::var_os(config::PATH_ENV).is_none() {
            assert_eq!(config::root_or_current(opt.path), ".");
        }
    }

    #[test]
    fn list_tags_accepts_output_formats() {
        let Command::ListTags(opt) = parse(&["list-tags", "--format", "json"]).command else {
            panic!("expected list-tags");
        };

        assert_eq!(opt.format, ListFormat::Json);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["tagwalk", "set-tags", "--albumIdx", "-1"]).is_err());
        assert!(Cli::try_parse_from(["tagwalk"]).is_err());
    }

    #[test]
    fn save_failures_keep_a_clean_exit() {
        let summary = SetSummary {
            tagged: 2,
            save_failures: vec![PathBuf::from("/m/b.mp3")],
        };

        let kept = outcome("set tags", "/m", Ok(summary)).unwrap();
        assert_eq!(
            summary_message(&kept),
            (false, "Tagged 2 files, 1 could not be saved.".to_string())
        );
        assert_eq!(
            summary_message(&SetSummary {
                tagged: 3,
                save_failures: Vec::new()
            }),
            (true, "Tagged 3 files.".to_string())
        );
    }

    #[test]
    fn fatal_errors_become_one_message() {
        let open: tagwalk::Result<SetSummary> = Err(TagError::TagOpenFailed {
            path: PathBuf::from("/m/bad.mp3"),
            source: "corrupt".into(),
        });
        let message = outcome("set tags", "/m", open).unwrap_err();
        assert!(message.starts_with("Failed to set tags at path /m:"));
        assert!(message.contains("/m/bad.mp3"));
        assert!(message.contains("corrupt"));

        let missing: tagwalk::Result<usize> = Err(TagError::PathNotFound {
            path: PathBuf::from("/nope"),
        });
        assert_eq!(
            outcome("list tags", "/nope", missing).unwrap_err(),
            "The path /nope does not exist"
        );
    }
}
