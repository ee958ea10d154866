//! Utility functions for simpletracker.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::OnceLock;

/// Euclidean distance between two coordinate vectors of equal length.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Exclusive prefix sum: `result[i]` is the sum of `values[..i]`.
///
/// The returned vector has the same length as `values`.
pub fn exclusive_cumsum(values: &[usize]) -> Vec<usize> {
    let mut total = 0;
    values
        .iter()
        .map(|&v| {
            let start = total;
            total += v;
            start
        })
        .collect()
}

/// Global set of warned messages (for warn_once).
static WARNED_MESSAGES: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Emit a warning only once per distinct message.
///
/// Subsequent calls with the same message are ignored.
pub fn warn_once(message: &str) {
    let warned = WARNED_MESSAGES.get_or_init(|| Mutex::new(HashSet::new()));
    // The set stays valid even if a holder panicked.
    let mut guard = match warned.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if guard.insert(message.to_string()) {
        tracing::warn!("{}", message);
    }
}
