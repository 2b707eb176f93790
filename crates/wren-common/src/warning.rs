//! Diagnostic warnings with colored terminal output.
//!
//! Provides deduplication so that a malformed document repeating the same
//! mistake thousands of times produces one line per distinct message.
//! Used by the HTML tokenizer to echo parse errors when asked to.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Print a warning for `component` (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unexpected-null-character in TagName state");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{YELLOW}[Wren {component}] ⚠ {message}{RESET}");
    }
}

/// Returns true if this exact warning has already been printed.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call between documents)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "first message");
        assert!(has_warned("Test", "first message"));
        assert!(!has_warned("Test", "never sent"));
        assert!(!has_warned("Other", "first message"));
    }

    #[test]
    fn test_repeated_warning_is_deduplicated() {
        warn_once("Dedup", "same");
        warn_once("Dedup", "same");
        let count = WARNED
            .lock()
            .unwrap()
            .as_ref()
            .map_or(0, |set| set.iter().filter(|k| k.starts_with("[Dedup]")).count());
        assert_eq!(count, 1);
    }
}
