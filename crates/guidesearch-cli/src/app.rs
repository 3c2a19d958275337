//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guidesearch")]
#[command(author, version, about = "Faceted search over a categorized guide corpus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Content root (overrides config and GUIDESEARCH_CONTENT_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search guides by text and facets
    Search(SearchArgs),

    /// List available categories, difficulties and tags
    Filters,

    /// Show one guide and its related guides
    Get(GetArgs),

    /// List guide link paths
    Ls(LsArgs),

    /// Show corpus statistics
    Stats,

    /// Scan the corpus and report skipped files
    Check,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (supports category:, difficulty: and tag: terms)
    pub query: Vec<String>,

    /// Filter by category (repeatable or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Filter by difficulty (repeatable or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub difficulty: Vec<String>,

    /// Filter by tag (repeatable or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tag: Vec<String>,

    /// Number of results
    #[arg(short = 'n', long)]
    pub limit: Option<String>,

    /// Show descriptions
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct GetArgs {
    /// Guide as category/slug (a leading slash is accepted)
    pub guide: String,

    /// Include the table of contents
    #[arg(long)]
    pub toc: bool,
}

#[derive(Args)]
pub struct LsArgs {
    /// Only list this category
    pub category: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
    Csv,
    Md,
    Files,
}
