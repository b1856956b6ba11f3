use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Destination markdown file (fully overwritten each run).
    #[arg(long)]
    pub out: String,

    /// Where to fetch the reading list from.
    #[arg(long, value_enum, default_value_t = SourceKind::Api)]
    pub source: SourceKind,

    /// Reader API base URL.
    #[arg(long, default_value = "https://readwise.io/api/v3")]
    pub base_url: String,

    /// Page size for list requests.
    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Reader HTTP API (paginated, requires READER_API_TOKEN).
    Api,
    /// MCP CLI subprocess (single page, degrades to empty on failure).
    Mcp,
}
