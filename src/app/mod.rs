//! Application-level utilities.
//!
//! This module provides input-line hygiene, progress logging, shutdown
//! handling, and statistics printing used by the scan loop.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::normalize_domain;
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_error_statistics;
