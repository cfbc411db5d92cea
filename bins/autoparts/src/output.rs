//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use serde::Serialize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format an inclusive model-year range
pub fn format_years(from: i32, to: i32) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{}-{}", from, to)
    }
}

/// Wrap the given `char` spans of `text` in bold
pub fn highlight(text: &str, spans: &[(usize, usize)]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * 8);
    let mut spans = spans.iter().peekable();
    let mut current = String::new();
    let mut inside = false;

    for (idx, c) in text.chars().enumerate() {
        while spans.peek().is_some_and(|&&(_, end)| idx >= end) {
            spans.next();
        }
        let in_span = spans.peek().is_some_and(|&&(start, end)| idx >= start && idx < end);
        if in_span != inside {
            flush(&mut out, &mut current, inside);
            inside = in_span;
        }
        current.push(c);
    }
    flush(&mut out, &mut current, inside);
    out
}

fn flush(out: &mut String, current: &mut String, bold: bool) {
    if current.is_empty() {
        return;
    }
    if bold {
        out.push_str(&current.bold().to_string());
    } else {
        out.push_str(current);
    }
    current.clear();
}
