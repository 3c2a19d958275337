//! Markdown output formatter

use super::FormatOptions;
use guidesearch_core::SearchResponse;

pub fn format_results(response: &SearchResponse, options: &FormatOptions) -> String {
    let mut output = String::from("# Search Results\n\n");

    for (i, doc) in response.results.iter().enumerate() {
        output.push_str(&format!("## {}. [{}]({})\n\n", i + 1, doc.title, doc.url_path()));
        if options.full {
            output.push_str(&format!("{}\n\n", doc.description));
        }
        output.push_str(&format!("- **Category**: {}\n", doc.category));
        output.push_str(&format!("- **Difficulty**: {}\n", doc.difficulty));
        output.push_str(&format!("- **Reading time**: {}\n", doc.reading_time()));
        if !doc.tags.is_empty() {
            output.push_str(&format!("- **Tags**: {}\n", doc.tags.join(", ")));
        }
        output.push_str("\n---\n\n");
    }

    if response.results.is_empty() {
        output.push_str("*No results found*\n");
    }

    output
}
