//! List command

use crate::app::{LsArgs, OutputFormat};
use anyhow::Result;
use guidesearch_core::{Document, SearchService};

pub fn run(args: LsArgs, service: &SearchService, format: OutputFormat) -> Result<u8> {
    let snapshot = service.snapshot();

    let docs: Vec<&Document> = match args.category {
        None => snapshot.documents.iter().collect(),
        Some(ref category) => {
            let docs: Vec<&Document> = snapshot
                .documents
                .iter()
                .filter(|d| &d.category == category)
                .collect();
            if docs.is_empty() {
                anyhow::bail!("Category not found: {}", category);
            }
            docs
        }
    };

    match format {
        OutputFormat::Json => {
            let paths: Vec<String> = docs.iter().map(|d| d.url_path()).collect();
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
        OutputFormat::Files => {
            for doc in docs {
                println!("{}", doc.url_path());
            }
        }
        _ => {
            for doc in docs {
                println!("{} [{}] {}", doc.url_path(), doc.difficulty, doc.title);
            }
        }
    }
    Ok(0)
}
