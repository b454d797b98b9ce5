//! Formatting utilities used for CLI outputs.

use crate::core::record::Breakdown;

/// es: 3725.4 -> "1h 2m 5s"
pub fn format_elapsed(secs: f64) -> String {
    let b = Breakdown::from_seconds(secs);
    format!("{}h {}m {}s", b.hours, b.minutes, b.seconds)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = unicode_width::UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(visible)))
}
