//! Guidesearch CLI
//!
//! Faceted search over a categorized guide corpus.

use anyhow::Result;
use clap::Parser;
use guidesearch_core::error::exit_codes;
use guidesearch_core::{Config, GuideSearchError, SearchService};
use std::process::ExitCode;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<GuideSearchError>()
                .map(GuideSearchError::exit_code)
                .unwrap_or(exit_codes::GENERAL_ERROR);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let mut config = Config::load()?;
    if let Some(root) = cli.root {
        config.content_root = root;
    }
    let service = SearchService::from_config(&config)?;

    match cli.command {
        Commands::Search(args) => commands::search::run(args, &service, cli.format),
        Commands::Filters => commands::filters::run(&service, cli.format),
        Commands::Get(args) => commands::get::run(args, &service, cli.format),
        Commands::Ls(args) => commands::ls::run(args, &service, cli.format),
        Commands::Stats => commands::stats::run(&service, cli.format),
        Commands::Check => commands::check::run(&service, cli.format),
    }
}
