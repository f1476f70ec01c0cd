//! Output formatting utilities

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Print a value as pretty JSON on stdout
pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a two-column table with a header row.
pub(crate) fn table(headers: (&str, &str), rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .chain(std::iter::once(headers.0.chars().count()))
        .max()
        .unwrap_or(0);

    println!(
        "  {}  {}",
        pad(headers.0, width).white().bold(),
        headers.1.white().bold()
    );
    println!("  {}  {}", "-".repeat(width), "-".repeat(headers.1.chars().count().max(4)));
    for (left, right) in rows {
        println!("  {}  {}", pad(left, width), right);
    }
}

/// Print a grid with one header row; every column is padded to its widest cell.
pub(crate) fn grid(headers: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = (0..headers.len())
        .map(|j| {
            rows.iter()
                .filter_map(|row| row.get(j))
                .chain(std::iter::once(&headers[j]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("  {}", line(headers).white().bold());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("  {}", rule.join("  "));
    for row in rows {
        println!("  {}", line(row));
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// One terminal bar for a silhouette value in [-1, 1], `half` cells per unit.
pub(crate) fn bar(value: f64, half: usize) -> String {
    let cells = (value.abs().min(1.0) * half as f64).round() as usize;
    if value < 0.0 {
        format!(
            "{}{}|{}",
            " ".repeat(half - cells),
            "█".repeat(cells),
            " ".repeat(half)
        )
    } else {
        format!("{}|{}{}", " ".repeat(half), "█".repeat(cells), " ".repeat(half - cells))
    }
}
