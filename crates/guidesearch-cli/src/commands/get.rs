//! Get guide command

use crate::app::{GetArgs, OutputFormat};
use anyhow::Result;
use guidesearch_core::{GuideSearchError, SearchService, TocEntry};

pub fn run(args: GetArgs, service: &SearchService, format: OutputFormat) -> Result<u8> {
    let (category, slug) = args
        .guide
        .trim_matches('/')
        .split_once('/')
        .ok_or_else(|| {
            GuideSearchError::InvalidInput(format!(
                "expected category/slug, got `{}`",
                args.guide
            ))
        })?;

    let detail = service
        .detail(category, slug)
        .ok_or_else(|| GuideSearchError::DocumentNotFound(format!("{category}/{slug}")))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        _ => {
            let doc = &detail.document;
            println!("{}", doc.title);
            println!("{}", doc.description);
            println!();
            println!("Path:       {}", doc.url_path());
            println!("Difficulty: {}", doc.difficulty);
            println!("Reading:    {}", doc.reading_time());
            if let Some(published) = doc.published_at {
                println!("Published:  {}", published.format("%Y-%m-%d"));
            }
            if !doc.tags.is_empty() {
                println!("Tags:       {}", doc.tags.join(", "));
            }

            if args.toc && !doc.table_of_contents.is_empty() {
                println!();
                println!("Contents:");
                print_toc(&doc.table_of_contents, 1);
            }

            if !detail.related.is_empty() {
                println!();
                println!("Related:");
                for related in &detail.related {
                    println!("  {} {}", related.url_path(), related.title);
                }
            }
        }
    }
    Ok(0)
}

fn print_toc(entries: &[TocEntry], depth: usize) {
    for entry in entries {
        println!("{}- {} (#{})", "  ".repeat(depth), entry.title, entry.id);
        print_toc(&entry.children, depth + 1);
    }
}
