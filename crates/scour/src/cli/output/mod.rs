//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use scour_index::{ContentHit, FacetResult};
use scour_search::SearchResultPage;
use serde::Serialize;

/// ANSI escape codes used by the CLI.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a result page as tables: hits, then facets, then paging hints.
pub fn print_page(page: &SearchResultPage) {
    let results = &page.results;

    if results.hits.is_empty() {
        println!("{}", dim(&format!("No results ({} total matches).", results.total)));
    } else {
        println!(
            "{}",
            subheader(&format!(
                "Results {}-{} of {}:",
                results.start + 1,
                results.end(),
                results.total
            ))
        );
        println!("{}", hits_table(&results.hits));
    }

    for facet in &results.facets {
        println!();
        print_facet(facet);
    }

    println!();
    print_page_info(page);
}

/// Builds the hit table.
fn hits_table(hits: &[ContentHit]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Cursor", "Score", "Id", "Path", "Language", "Version"]);
    for hit in hits {
        let version = if hit.is_latest_version {
            format!("{} (latest)", hit.version)
        } else {
            hit.version.to_string()
        };
        table.add_row(vec![
            Cell::new(hit.cursor.to_string()),
            Cell::new(format!("{:.2}", hit.score)),
            Cell::new(&hit.id),
            Cell::new(&hit.path),
            Cell::new(&hit.language),
            Cell::new(version),
        ]);
    }
    table
}

/// Prints one facet's value counts.
fn print_facet(facet: &FacetResult) {
    println!("{}", subheader(&format!("Facet {}:", facet.name)));
    if facet.values.is_empty() {
        println!("  {}", dim("(no values)"));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Value", "Count"]);
    for value in &facet.values {
        table.add_row(vec![
            Cell::new(&value.value),
            Cell::new(value.count.to_string()),
        ]);
    }
    println!("{table}");
}

/// Prints cursors and how to reach the neighbouring pages.
fn print_page_info(page: &SearchResultPage) {
    let info = &page.page_info;
    if let (Some(start), Some(end)) = (&info.start_cursor, &info.end_cursor) {
        println!("{}", dim(&format!("Cursors {start}..{end}, offset {}", page.offset)));
    }
    if info.has_previous_page
        && let Some(start) = &info.start_cursor
    {
        println!("{}", dim(&format!("Previous page: --before {start}")));
    }
    if info.has_next_page
        && let Some(end) = &info.end_cursor
    {
        println!("{}", dim(&format!("Next page: --after {end}")));
    }
}
