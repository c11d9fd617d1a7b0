//! Per-domain scan orchestration.
//!
//! Drives the three lookups (MX, apex TXT, `_dmarc.` TXT) for each domain,
//! converts failures into diagnostics, and assembles exactly one posture per
//! input domain.

mod diagnostics;
mod posture;
mod retry;

// Re-export public API
pub use diagnostics::{spawn_reporter, Diagnostic, DiagnosticsSender, QueryKind};
pub use posture::DomainPosture;
pub use retry::lookup_with_retry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::dns::{classify_dmarc, classify_spf, DnsLookup};
use crate::error_handling::{ErrorType, ScanStats};

impl From<QueryKind> for ErrorType {
    fn from(query: QueryKind) -> Self {
        match query {
            QueryKind::Mx => ErrorType::DnsMxLookupError,
            QueryKind::ApexTxt => ErrorType::DnsTxtLookupError,
            QueryKind::DmarcTxt => ErrorType::DnsDmarcLookupError,
        }
    }
}

/// Shared resources for scanning domains.
///
/// Cheap to clone; one clone travels into each worker task.
#[derive(Clone)]
pub struct ScanContext {
    /// DNS lookup capability (stubbed in tests)
    pub resolver: Arc<dyn DnsLookup>,
    /// Side channel for per-lookup failure diagnostics
    pub diagnostics: DiagnosticsSender,
    /// Aggregate failure counters
    pub stats: Arc<ScanStats>,
}

impl ScanContext {
    fn report_failure(&self, domain: &str, query: QueryKind, error: crate::dns::DnsError) {
        self.stats.increment(ErrorType::from(query));
        // The receiver only goes away on shutdown; a failed send just means
        // nobody is listening any more
        let _ = self.diagnostics.send(Diagnostic {
            domain: domain.to_string(),
            query,
            error,
        });
    }
}

/// Scans one domain and returns its posture.
///
/// The three lookups are independent and issued concurrently. A failure in
/// any of them downgrades that field to "absent" and emits one diagnostic;
/// it never aborts the other lookups, and the domain always yields a
/// posture.
pub async fn scan_domain(ctx: &ScanContext, domain: &str) -> DomainPosture {
    let dmarc_name = format!("_dmarc.{domain}");

    let (mx_outcome, txt_outcome, dmarc_outcome) = tokio::join!(
        lookup_with_retry(|| ctx.resolver.lookup_mx(domain)),
        lookup_with_retry(|| ctx.resolver.lookup_txt(domain)),
        lookup_with_retry(|| ctx.resolver.lookup_txt(&dmarc_name)),
    );

    let has_mx = match mx_outcome {
        Ok(hosts) => !hosts.is_empty(),
        Err(error) => {
            ctx.report_failure(domain, QueryKind::Mx, error);
            false
        }
    };

    let spf_record = match txt_outcome {
        Ok(records) => classify_spf(&records),
        Err(error) => {
            ctx.report_failure(domain, QueryKind::ApexTxt, error);
            None
        }
    };

    let dmarc_record = match dmarc_outcome {
        Ok(records) => classify_dmarc(&records),
        Err(error) => {
            ctx.report_failure(domain, QueryKind::DmarcTxt, error);
            None
        }
    };

    DomainPosture::new(domain.to_string(), has_mx, spf_record, dmarc_record)
}
