//! Terminal output formatter

use super::FormatOptions;
use guidesearch_core::SearchResponse;

pub fn format_results(response: &SearchResponse, options: &FormatOptions) -> String {
    if response.results.is_empty() {
        return String::new();
    }

    let mut output = String::new();

    for doc in &response.results {
        output.push_str(&format!(
            "{:<12} {} ({})\n",
            doc.difficulty.as_str(),
            doc.url_path(),
            doc.title
        ));

        if options.full {
            output.push_str(&format!("  {}\n", doc.description));
            if !doc.tags.is_empty() {
                output.push_str(&format!("  tags: {}\n", doc.tags.join(", ")));
            }
        }
    }

    output.push_str(&format!("\n{} result(s)\n", response.total));
    output
}
