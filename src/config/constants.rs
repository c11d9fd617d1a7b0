//! Configuration constants.
//!
//! This module defines the timeouts, limits, and retry parameters used
//! throughout the scanner. The concurrency and query-timeout values are only
//! defaults; both are overridable from the command line.

use std::time::Duration;

/// Maximum concurrent domain scans (semaphore limit), used as the CLI default.
/// Kept small to avoid self-inflicted rate limiting by upstream resolvers.
pub const SEMAPHORE_LIMIT: usize = 16;

/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;

/// Per-domain scan timeout.
/// A domain issues three DNS queries, each with its own deadline and bounded
/// retries; this outer guard catches anything that still manages to wedge.
pub const DOMAIN_SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// DNS query timeout in seconds (CLI default).
/// Most queries complete in well under a second; 5s gives slow authoritative
/// servers a fair chance while keeping a stuck server from stalling a worker.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Longest domain name DNS will carry (RFC 1035). Input lines beyond this are
/// garbage and are skipped rather than queried.
pub const MAX_DOMAIN_LENGTH: usize = 253;

// Retry strategy
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Factor applied to the retry delay on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 2;
/// Maximum number of retries after the initial attempt.
/// Only transient failures (timeouts, server failures) are retried at all.
pub const RETRY_MAX_ATTEMPTS: usize = 2;
