//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcsift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List archive entries, optionally filtered
    View(ViewArgs),
    /// Extract archive entries, optionally filtered
    Extract(ExtractArgs),
    /// Move the archive file into another directory
    Move(MoveArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Entry selection flags shared by `view` and `extract`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Select entries by name, matched against the entry path like --search (repeatable)
    #[arg(short = 'f', long = "files", value_name = "NAME", action = ArgAction::Append)]
    pub files: Vec<String>,

    /// Select entries whose extension contains TYPE, e.g. ".pdf" (repeatable)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Select entries matching a regular expression (repeatable)
    #[arg(short = 's', long = "search", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Require every name and every pattern to match instead of any
    #[arg(short = 'x', long)]
    pub exclusive: bool,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("destination")
        .args(["path", "default_folder", "current_dir", "folder_name"])
        .multiple(false)
))]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Extract into PATH (relative paths start at the archive's directory)
    #[arg(short = 'p', long, value_name = "PATH")]
    pub path: Option<String>,

    /// Extract into a folder named after the archive, next to it
    #[arg(short = 'd', long)]
    pub default_folder: bool,

    /// Extract into a folder named after the archive, in the current directory
    #[arg(long = "current-dir", visible_alias = "cd")]
    pub current_dir: bool,

    /// Extract into a folder with this name, in the current directory
    #[arg(long = "folder-name", visible_alias = "fn", value_name = "NAME")]
    pub folder_name: Option<String>,

    /// Place every file directly in the destination, dropping directories
    #[arg(short = 'a', long)]
    pub files_only: bool,

    /// Refuse to extract unless the destination path contains SUBSTR
    #[arg(short = 'c', long = "check", value_name = "SUBSTR")]
    pub check: Option<String>,

    /// Delete the archive after a successful extraction
    #[arg(long)]
    pub delete_archive: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to move the archive into
    #[arg(value_name = "DEST_DIR")]
    pub dest_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "arcsift", "extract", "a.zip", "-d", "-a", "-t", ".pdf", "-t", ".txt", "-c", "safe",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert!(args.default_folder);
        assert!(args.files_only);
        assert_eq!(args.filter.types, vec![".pdf", ".txt"]);
        assert_eq!(args.check.as_deref(), Some("safe"));
    }

    #[test]
    fn test_files_flag_before_archive() {
        let cli = Cli::try_parse_from([
            "arcsift", "view", "-f", "report", "-f", "notes", "bundle.zip",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::View(args) = cli.command else {
            panic!("expected view");
        };
        assert_eq!(args.archive, PathBuf::from("bundle.zip"));
        assert_eq!(args.filter.files, vec!["report", "notes"]);
    }

    #[test]
    fn test_destination_flags_conflict() {
        let result = Cli::try_parse_from(["arcsift", "extract", "a.zip", "-d", "-p", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["arcsift", "extract", "a.zip", "--fn", "box"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.folder_name.as_deref(), Some("box"));
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["arcsift", "-vv", "view", "a.zip"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.verbose, 2);
    }
}
