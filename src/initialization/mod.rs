//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (with plain/JSON formatting)
//! - DNS resolver
//! - Concurrency semaphore

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore limits the number of domains scanned at once; a permit is
/// acquired before each worker task is spawned and released when it
/// finishes.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
