//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// emoji-palette - headless emoji picker: browse categories, track recents, search by description
#[derive(Parser, Debug)]
#[command(name = "emoji-palette")]
#[command(version)]
#[command(about = "Headless emoji picker: browse categories, track recents, search by description", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Input locale used to select the emoji dictionary (overrides settings.conf)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// JSON catalog replacing the built-in emoji set (overrides settings.conf)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Dictionary cache directory (default: ~/.config/emoji-palette/dicts)
    #[arg(long, global = true)]
    pub dict_dir: Option<PathBuf>,

    /// Do not record picks in recents
    #[arg(long, global = true)]
    pub incognito: bool,

    /// Command to run; defaults to an interactive session
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print emoji whose description contains QUERY
    Search {
        /// Case-insensitive substring
        query: String,
    },
    /// Print the description of an emoji
    Describe {
        /// Emoji key
        key: String,
    },
    /// List shown categories with their page counts
    Categories,
    /// List recently used emoji, most recent first
    Recents,
    /// Install a dictionary file for the locale
    Install {
        /// Dictionary file (JSON or combined word list)
        file: PathBuf,
    },
    /// Download the dictionary for the locale
    Download {
        /// Base URL overriding `dictionary_url`
        #[arg(long)]
        url: Option<String>,
    },
    /// Line-driven interactive session reading commands from stdin
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Global flags parse before and after the subcommand; no subcommand means session.
    fn parses_commands_and_global_flags() {
        let args = Args::parse_from(["emoji-palette", "--locale", "de", "search", "face", "-v"]);
        assert_eq!(args.locale.as_deref(), Some("de"));
        assert!(args.verbose);
        assert_eq!(
            args.command,
            Some(Command::Search {
                query: "face".into()
            })
        );

        let bare = Args::parse_from(["emoji-palette"]);
        assert_eq!(bare.command, None);
        assert_eq!(bare.log_level, "info");

        let dl = Args::parse_from(["emoji-palette", "download", "--url", "file:///d"]);
        assert_eq!(
            dl.command,
            Some(Command::Download {
                url: Some("file:///d".into())
            })
        );
    }
}
