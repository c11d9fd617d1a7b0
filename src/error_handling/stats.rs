//! Scan statistics tracking.
//!
//! Thread-safe failure counters shared across worker tasks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe lookup-failure counters.
///
/// Every `ErrorType` is initialized to zero on creation, so increments never
/// have to allocate and the struct can be shared across tasks with `Arc`.
pub struct ScanStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ScanStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ScanStats { errors }
    }

    /// Increments the counter for an error type.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ScanStats initialization.",
                error
            );
        }
    }

    /// Returns the count for an error type.
    pub fn count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Returns the total failure count across all error types.
    pub fn total(&self) -> usize {
        ErrorType::iter().map(|e| self.count(e)).sum()
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}
