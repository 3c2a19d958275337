//! Link path output formatter

use guidesearch_core::SearchResponse;

pub fn format_results(response: &SearchResponse) -> String {
    response
        .results
        .iter()
        .map(|doc| doc.url_path() + "\n")
        .collect()
}
