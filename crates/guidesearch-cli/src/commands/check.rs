//! Check command: rebuild the snapshot and report what was skipped

use crate::app::OutputFormat;
use anyhow::Result;
use guidesearch_core::error::exit_codes;
use guidesearch_core::{DiagnosticKind, SearchService};

pub fn run(service: &SearchService, format: OutputFormat) -> Result<u8> {
    service.invalidate();
    let snapshot = service.snapshot();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "documents": snapshot.len(),
                "diagnostics": snapshot.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("Indexed {} guides", snapshot.len());
            for diagnostic in &snapshot.diagnostics {
                println!("  {}: {}", diagnostic.path.display(), diagnostic.message);
            }
        }
    }

    let failed = snapshot
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::DocumentParse);
    Ok(if failed {
        exit_codes::GENERAL_ERROR as u8
    } else {
        exit_codes::SUCCESS as u8
    })
}
