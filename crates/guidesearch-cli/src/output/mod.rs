//! Output formatters

pub mod csv;
pub mod files;
pub mod json;
pub mod markdown;
pub mod terminal;

use crate::app::OutputFormat;
use guidesearch_core::SearchResponse;

/// Format options
pub struct FormatOptions {
    pub full: bool,
}

/// Format a search response
pub fn format_search_results(
    response: &SearchResponse,
    format: OutputFormat,
    options: &FormatOptions,
) -> String {
    match format {
        OutputFormat::Json => json::format_results(response),
        OutputFormat::Csv => csv::format_results(response),
        OutputFormat::Md => markdown::format_results(response, options),
        OutputFormat::Files => files::format_results(response),
        OutputFormat::Cli => terminal::format_results(response, options),
    }
}
