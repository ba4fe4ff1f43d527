//! Terminal rendering of search state

use owo_colors::OwoColorize;
use search::SearchHit;

/// Results are laid out in rows of this many cells
pub const GRID_COLUMNS: usize = 4;

/// Width of a single grid cell, in characters
const CELL_WIDTH: usize = 24;

/// Format hits as a grid of titles, `GRID_COLUMNS` per row
pub fn grid(hits: &[SearchHit]) -> Vec<String> {
    hits.chunks(GRID_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|hit| format!("{:<width$}", cell(&hit.title), width = CELL_WIDTH))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Truncate a title to fit its cell
fn cell(title: &str) -> String {
    if title.chars().count() <= CELL_WIDTH {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(CELL_WIDTH - 1).collect();
    truncated.push('…');
    truncated
}

pub fn print_results(term: &str, hits: &[SearchHit]) {
    println!(
        "{} {}",
        format!("Search results for \"{}\"", term).bold(),
        format!("({})", hits.len()).dimmed()
    );

    if hits.is_empty() {
        println!("  {}", "No results".dimmed());
        return;
    }

    for row in grid(hits) {
        println!("  {}", row);
    }
}

pub fn print_error(message: &str) {
    println!("{}", message.red());
}
