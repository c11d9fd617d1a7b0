//! DNS querying and record classification.
//!
//! This module provides:
//! - the `DnsLookup` seam and its `hickory-resolver`-backed implementation
//! - the `DnsError` taxonomy for failed queries
//! - SPF/DMARC classification over returned TXT records

mod classify;
mod error;
mod resolver;

// Re-export public API
pub use classify::{classify_dmarc, classify_spf};
pub use error::DnsError;
pub use resolver::{DnsLookup, HickoryDns};
