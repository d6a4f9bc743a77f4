// Result formatting
// Turns result rows into text for the shell. Column order always comes
// from the first row.

use crate::storage::Row;
use anyhow::Result;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// Header and values separated by " | "
    Plain,
    /// Pretty-printed JSON array of objects
    Json,
}

/// Marker printed for an empty result in the text formats
pub const NO_ROWS: &str = "(no rows)";

/// Format rows according to the requested format
pub fn format_rows(rows: &[Row], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(rows)),
        OutputFormat::Plain => Ok(format_plain(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

fn header(rows: &[Row]) -> Vec<&str> {
    rows.first()
        .map(|row| row.columns().collect())
        .unwrap_or_default()
}

/// Cell text for each row, following the first row's columns
fn cells(rows: &[Row], columns: &[&str]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| row.get(col).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

fn format_plain(rows: &[Row]) -> String {
    if rows.is_empty() {
        return NO_ROWS.to_string();
    }

    let columns = header(rows);
    let header_line = columns.join(" | ");
    let mut lines = vec![header_line.clone(), "-".repeat(header_line.chars().count())];
    lines.extend(cells(rows, &columns).iter().map(|values| values.join(" | ")));
    lines.join("\n")
}

/// Draw one horizontal border, e.g. ┌───┬───┐
fn border(widths: &[usize], left: &str, middle: &str, right: &str) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(middle), right)
}

fn format_table(rows: &[Row]) -> String {
    if rows.is_empty() {
        return NO_ROWS.to_string();
    }

    let columns = header(rows);
    let values = cells(rows, &columns);

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &values {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let line = |items: &[String]| {
        let mut out = String::from("│");
        for (item, width) in items.iter().zip(&widths) {
            out.push_str(&format!(" {:<width$} │", item, width = width));
        }
        out.push('\n');
        out
    };

    let mut result = border(&widths, "┌", "┬", "┐");
    let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    result.push_str(&line(names.as_slice()));
    result.push_str(&border(&widths, "├", "┼", "┤"));
    for row in &values {
        result.push_str(&line(row.as_slice()));
    }
    result.push_str(&border(&widths, "└", "┴", "┘"));
    result.push_str(&format!("\n{} row(s) returned", rows.len()));
    result
}
