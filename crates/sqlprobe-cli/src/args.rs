//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlprobe")]
#[command(author, version, about = "Line-level SQL checks with schema-aware completion")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check SQL files for syntax problems
    Check {
        /// SQL files to check (supports glob patterns)
        files: Vec<PathBuf>,

        /// Configuration file (defaults to the nearest sqlprobe.toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Rules to disable, by code or name (e.g. S0001, missing-table-name)
        #[arg(long, value_name = "RULE")]
        disable: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List completions at a cursor position
    Complete {
        /// SQL file being edited
        file: PathBuf,

        /// Assignment schema (JSON)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Cursor line (1-indexed)
        #[arg(long)]
        line: usize,

        /// Cursor column (1-indexed)
        #[arg(long)]
        column: usize,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Describe a table or column from the schema
    Hover {
        /// Word to describe; omit to use --file/--line/--column
        word: Option<String>,

        /// Assignment schema (JSON)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// SQL file to take the word from
        #[arg(long, requires_all = ["line", "column"], conflicts_with = "word")]
        file: Option<PathBuf>,

        /// Line of the word (1-indexed)
        #[arg(long)]
        line: Option<usize>,

        /// Column of the word (1-indexed)
        #[arg(long)]
        column: Option<usize>,
    },

    /// Display schema information
    Schema {
        /// Assignment schema (JSON); defaults to the configured schema
        file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
    /// SARIF output (for GitHub Code Scanning)
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_hover_by_position() {
        let args = Args::parse_from([
            "sqlprobe", "hover", "--schema", "s.json", "--file", "q.sql", "--line", "2",
            "--column", "5",
        ]);
        match args.command {
            Command::Hover {
                word, file, line, column, ..
            } => {
                assert!(word.is_none());
                assert_eq!(file, Some(PathBuf::from("q.sql")));
                assert_eq!((line, column), (Some(2), Some(5)));
            }
            _ => panic!("expected hover command"),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("SARIF".parse::<OutputFormat>(), Ok(OutputFormat::Sarif));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
