//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The parsing crates never print; they hand issues back to the caller, which
//! forwards them here.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `key` and report whether it was new.
fn first_time(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Tree Builder", "unmatched end tag </span> ignored");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if first_time(key) {
        eprintln!("{}", format!("[sift {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
