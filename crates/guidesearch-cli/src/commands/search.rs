//! Search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output::{format_search_results, FormatOptions};
use anyhow::Result;
use guidesearch_core::search::parse_limit_or;
use guidesearch_core::{SearchRequest, SearchService};

pub fn run(args: SearchArgs, service: &SearchService, format: OutputFormat) -> Result<u8> {
    let request = build_request(&args, service.default_limit());
    let response = service.search(&request);

    let format_opts = FormatOptions { full: args.full };
    print!("{}", format_search_results(&response, format, &format_opts));
    Ok(0)
}

fn build_request(args: &SearchArgs, default_limit: usize) -> SearchRequest {
    let query = args.query.join(" ");
    let mut request = SearchRequest::new()
        .categories(args.category.iter().filter(|c| !c.is_empty()).cloned())
        .difficulties(args.difficulty.iter().filter(|d| !d.is_empty()).cloned())
        .tags(args.tag.iter().filter(|t| !t.is_empty()).cloned())
        .limit(parse_limit_or(args.limit.as_deref(), default_limit));

    if !query.trim().is_empty() {
        request = request.query(query);
    }

    request.with_inline_filters()
}
