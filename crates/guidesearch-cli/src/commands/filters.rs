//! Filters command

use crate::app::OutputFormat;
use anyhow::Result;
use guidesearch_core::SearchService;

pub fn run(service: &SearchService, format: OutputFormat) -> Result<u8> {
    let filters = service.available_filters();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filters)?);
        }
        _ => {
            println!("Categories:   {}", filters.categories.join(", "));
            println!("Difficulties: {}", filters.difficulties.join(", "));
            println!("Tags:         {}", filters.tags.join(", "));
        }
    }
    Ok(0)
}
