use colored::Colorize;

use crate::extract::RECORD_FIELDS;

/// Labels for the rendered prize fields, in stored order.
pub const PRIZE_LABELS: [&str; RECORD_FIELDS] =
    ["1st", "Consolation", "2nd", "3rd", "4th", "5th"];

/// Format timestamp in human-readable format
pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Empty prize fields show as a dimmed dash
pub fn format_prize(value: &str) -> String {
    if value.is_empty() {
        "-".dimmed().to_string()
    } else {
        value.to_string()
    }
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    println!("{}", table_row(columns, widths));
}

fn table_row(columns: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (col, width) in columns.iter().zip(widths) {
        row.push_str(&format!("{:<width$}  ", col, width = width));
    }
    row.trim_end().to_string()
}

/// Print the six rendered fields of one slot as a two-column table.
pub fn print_prizes(prizes: &[String; RECORD_FIELDS]) {
    print_table_border(60);
    for (label, value) in PRIZE_LABELS.iter().zip(prizes) {
        print_table_row(&[*label, format_prize(value).as_str()], &[12, 44]);
    }
    print_table_border(60);
}
