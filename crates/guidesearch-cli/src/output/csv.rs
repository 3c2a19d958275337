//! CSV output formatter

use guidesearch_core::SearchResponse;

pub fn format_results(response: &SearchResponse) -> String {
    let mut output = String::from("category,slug,title,difficulty,published_at,tags\n");

    for doc in &response.results {
        let published = doc
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape_csv(&doc.category),
            escape_csv(&doc.slug),
            escape_csv(&doc.title),
            doc.difficulty,
            published,
            escape_csv(&doc.tags.join(";"))
        ));
    }

    output
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
