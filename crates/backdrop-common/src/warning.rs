//! Compositor diagnostics with deduplication.
//!
//! Style strings arrive once per frame from the host, so a malformed value
//! would otherwise be reported on every draw. Each unique `[component] message`
//! pair is forwarded to `tracing` exactly once per thread until
//! [`clear_warnings`] is called.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    /// Warnings already emitted on this thread.
    static WARNED: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Report a style value that was rejected and reset to its default
/// (emitted once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("Position", "malformed length '10pxx', reset to 0px 0px");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first = WARNED.with(|warned| warned.borrow_mut().insert(key));

    if first {
        tracing::warn!(component = %component, "{message}");
    }
}

/// Forget every warning recorded on this thread, so they are reported again.
pub fn clear_warnings() {
    WARNED.with(|warned| warned.borrow_mut().clear());
}

/// Number of distinct warnings recorded on this thread.
#[must_use]
pub fn warning_count() -> usize {
    WARNED.with(|warned| warned.borrow().len())
}
