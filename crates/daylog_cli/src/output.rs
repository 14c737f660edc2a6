//! Output formatting utilities

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{msg}");
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("warning: {msg}");
}

/// Checkbox marker for a done flag
pub fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Trimmed text, or `None` when nothing is left
pub fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{check, non_empty};

    #[test]
    fn non_empty_trims_and_rejects_blank() {
        assert_eq!(non_empty("  read  "), Some("read"));
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
    }

    #[test]
    fn check_marks_done() {
        assert_eq!(check(true), "[x]");
        assert_eq!(check(false), "[ ]");
    }
}
