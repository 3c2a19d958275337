//! Stats command

use crate::app::OutputFormat;
use anyhow::Result;
use guidesearch_core::SearchService;

pub fn run(service: &SearchService, format: OutputFormat) -> Result<u8> {
    let stats = service.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        _ => {
            println!("Guides:          {}", stats.total_guides);
            println!("Words:           {}", stats.total_words);
            println!("Avg reading:     {} min", stats.average_reading_minutes);
            if let Some(updated) = stats.last_updated {
                println!("Last published:  {}", updated.format("%Y-%m-%d"));
            }
            println!();
            println!("Categories:");
            for (category, count) in &stats.category_counts {
                println!("  {category:<24} {count}");
            }
            println!();
            println!("Difficulty:");
            for (difficulty, count) in &stats.difficulty_distribution {
                println!("  {:<24} {count}", difficulty.as_str());
            }
        }
    }
    Ok(0)
}
