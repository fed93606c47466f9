//! UI utilities for the one-shot commands.

use crossterm::style::Stylize;
use metricdash_core::ConnectionState;

/// Calculate display width of a string (accounting for wide chars like emoji).
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                1
            } else {
                // Most CJK and emoji are 2 cells wide
                2
            }
        })
        .sum()
}

/// Print a section header with box drawing characters.
pub fn print_header(title: &str) {
    let inner_width: usize = 58;
    let title_width = display_width(title);
    let total_padding = inner_width.saturating_sub(title_width);
    let left_pad = total_padding / 2;
    let right_pad = total_padding - left_pad;

    println!();
    println!("{}", format!("╔{}╗", "═".repeat(inner_width)).dark_cyan());
    println!(
        "{}",
        format!(
            "║{}{}{}║",
            " ".repeat(left_pad),
            title,
            " ".repeat(right_pad)
        )
        .dark_cyan()
    );
    println!("{}", format!("╚{}╝", "═".repeat(inner_width)).dark_cyan());
    println!();
}

/// Print a small section title.
pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "▸".dark_cyan(), title.white().bold());
    println!("  {}", "─".repeat(50).dark_grey());
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print a key-value pair.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<14} {}", format!("{}:", key).dark_grey(), value);
}

/// Print a key-value pair with colored value.
pub fn print_kv_colored(key: &str, value: &str, color: KvColor) {
    let styled_value = match color {
        KvColor::Cyan => value.cyan().to_string(),
        KvColor::White => value.white().bold().to_string(),
    };
    println!("  {:<14} {}", format!("{}:", key).dark_grey(), styled_value);
}

#[derive(Clone, Copy)]
pub enum KvColor {
    Cyan,
    White,
}

/// Format connection status with color.
pub fn format_status(state: ConnectionState) -> String {
    match state {
        ConnectionState::Live => format!("✔ {}", state.label()).green().to_string(),
        ConnectionState::Demo => format!("✗ {}", state.label()).red().to_string(),
        ConnectionState::Loading => format!("… {}", state.label()).yellow().to_string(),
    }
}

/// Print a hint/tip message.
pub fn print_hint(msg: &str) {
    println!("  {} {}", "💡".yellow(), msg.dark_grey());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(display_width("CPU"), 3);
        assert_eq!(display_width("📊 CPU"), 6);
    }

    #[test]
    fn status_keeps_label_text() {
        assert!(format_status(ConnectionState::Live).contains("Connected"));
        assert!(format_status(ConnectionState::Demo).contains("Demo Mode"));
    }
}
