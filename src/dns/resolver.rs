//! The resolver seam and its hickory-backed implementation.

use async_trait::async_trait;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use std::sync::Arc;

use super::error::{lookup_outcome, DnsError};

/// Capability object for the DNS queries the scanner issues.
///
/// Modeled as an explicit collaborator rather than a process-wide resolver so
/// tests can substitute a deterministic stub. Each call performs exactly one
/// outbound query; there is no caching layer, and repeated calls for the same
/// name re-query.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Queries MX (mail exchanger) records for a domain.
    ///
    /// Success yields `(preference, exchange)` pairs sorted by preference.
    /// An empty vector means the domain publishes no mail exchangers, which
    /// is a valid answer rather than an error.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, DnsError>;

    /// Queries TXT (text) records for an arbitrary fully-qualified name,
    /// used both for the domain apex and for the `_dmarc.` label.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError>;
}

/// Production resolver backed by `hickory_resolver`.
pub struct HickoryDns {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryDns {
    /// Wraps an already-configured resolver.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsLookup for HickoryDns {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, DnsError> {
        match self.resolver.lookup(domain, RecordType::MX).await {
            Ok(lookup) => {
                let mut mx_records: Vec<(u16, String)> = lookup
                    .iter()
                    .filter_map(|rdata| {
                        if let RData::MX(mx) = rdata {
                            Some((mx.preference(), mx.exchange().to_utf8()))
                        } else {
                            None
                        }
                    })
                    .collect();
                // Lower preference value = higher priority
                mx_records.sort_by_key(|(preference, _)| *preference);
                Ok(mx_records)
            }
            Err(e) => lookup_outcome(e),
        }
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError> {
        match self.resolver.lookup(name, RecordType::TXT).await {
            Ok(lookup) => {
                let txt_records: Vec<String> = lookup
                    .iter()
                    .filter_map(|rdata| {
                        if let RData::TXT(txt) = rdata {
                            // A single TXT record can be split into multiple
                            // character-strings on the wire - join them
                            Some(
                                txt.iter()
                                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                                    .collect::<Vec<String>>()
                                    .join(""),
                            )
                        } else {
                            None
                        }
                    })
                    .collect();
                Ok(txt_records)
            }
            Err(e) => lookup_outcome(e),
        }
    }
}
