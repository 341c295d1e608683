//! Clap argument definitions for the `scour` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "scour")]
#[command(about = "Content search - translate search arguments into index queries")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `scour init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.scour.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `scour index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// JSON-lines file of content documents, or `-` for stdin
    pub file: PathBuf,

    /// Index to write [default: the configured database's index]
    #[arg(short = 'i', long)]
    pub index: Option<String>,

    /// Remove every document before ingesting
    #[arg(long)]
    pub rebuild: bool,
}

/// Arguments for `scour search`.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchCommand {
    /// Id or path of the item to search under
    #[arg(short = 'r', long)]
    pub root: Option<String>,

    /// Free-text keyword
    #[arg(short = 'k', long)]
    pub keyword: Option<String>,

    /// Language of the versions to return
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Include versions that are not the latest
    #[arg(long)]
    pub all_versions: bool,

    /// Index to search [default: the configured database's index]
    #[arg(short = 'i', long)]
    pub index: Option<String>,

    /// Field equality filter, NAME=VALUE (can be specified multiple times)
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Field to facet on (can be specified multiple times)
    #[arg(long = "facet", value_name = "NAME")]
    pub facets: Vec<String>,

    /// Keep at most N hits from the front
    #[arg(long, value_name = "N")]
    pub first: Option<String>,

    /// Keep at most N hits from the back
    #[arg(long, value_name = "N")]
    pub last: Option<String>,

    /// Only hits before this cursor
    #[arg(long, value_name = "CURSOR")]
    pub before: Option<String>,

    /// Only hits after this cursor
    #[arg(long, value_name = "CURSOR")]
    pub after: Option<String>,

    /// Raw argument object, as the GraphQL field receives it
    #[arg(long, value_name = "JSON")]
    pub args: Option<String>,

    /// Output the result page as JSON
    #[arg(long)]
    pub json: bool,
}

/// Supported `scour` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize scour configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Add content documents to an index
    #[command(after_help = "\
INPUT FORMAT:
  One JSON object per line:
  {\"id\": \"{6A1E...}\", \"path\": \"/sitecore/content/home/bikes\",
   \"ancestors\": [\"{11DE...}\"], \"content\": \"Road bicycle\",
   \"language\": \"en\", \"version\": 2, \"is_latest_version\": true,
   \"fields\": {\"category\": \"sports\"}}

  A document replaces the stored version with the same id, language and
  version.")]
    Index(IndexCommand),

    /// Search an index
    #[command(after_help = "\
EXAMPLES:
  scour search -k bicycle -f category=sports
  scour search -r /sitecore/content/home --facet color --first 10
  scour search --first 10 --after 10
  scour search --args '{\"keyword\": \"bicycle\", \"latestVersion\": false}'
  scour search -k bicycle --json")]
    Search(SearchCommand),

    /// Show status and validate configuration
    Status,
}
