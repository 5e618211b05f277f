//! Output formatting for the CLI.

use console::{style, Term};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row, truncating the last column to the terminal width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        let line = formatted.join("  ");
        let max = self.term_width().saturating_sub(2);
        if max > 0 && line.chars().count() > max {
            let truncated: String = line.chars().take(max.saturating_sub(1)).collect();
            println!("  {}…", truncated);
        } else {
            println!("  {}", line);
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width; 0 when not attached to a terminal.
    pub fn term_width(&self) -> usize {
        if self.term.is_term() {
            self.term.size().1 as usize
        } else {
            0
        }
    }
}

/// Price column text.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("{} DA", group_thousands(p as i64)),
        Some(p) => format!("{:.2} DA", p),
        None => style("—").dim().to_string(),
    }
}

/// Highlight a detection score against its threshold.
pub fn score_badge(score: u32, threshold: u32) -> String {
    if score == 0 {
        style(score).dim().to_string()
    } else if score >= threshold {
        style(score).green().bold().to_string()
    } else {
        style(score).yellow().to_string()
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_900_000), "1 900 000");
        assert_eq!(group_thousands(-45_000), "-45 000");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(150000.0)), "150 000 DA");
        assert_eq!(format_price(Some(12.5)), "12.50 DA");
    }
}
