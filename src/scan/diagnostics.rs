//! Per-lookup failure diagnostics.
//!
//! Failed lookups never interrupt a scan; they are converted into
//! `Diagnostic` values on a side channel, and a reporter task drains the
//! channel to the log. This keeps failure visibility out of the scan's
//! control flow.

use std::fmt;

use tokio::sync::mpsc;

use crate::dns::DnsError;

/// Which of the three per-domain queries failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// The MX lookup on the apex
    Mx,
    /// The TXT lookup on the apex (SPF)
    ApexTxt,
    /// The TXT lookup on the `_dmarc.` label
    DmarcTxt,
}

impl QueryKind {
    /// Returns the query type as it appears in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Mx => "MX",
            QueryKind::ApexTxt => "TXT",
            QueryKind::DmarcTxt => "TXT (_dmarc)",
        }
    }
}

/// One failed lookup: which domain, which query, what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The domain whose lookup failed
    pub domain: String,
    /// The query that failed
    pub query: QueryKind,
    /// The final error, after any retries
    pub error: DnsError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lookup failed for {}: {}",
            self.query.as_str(),
            self.domain,
            self.error
        )
    }
}

/// Sending half of the diagnostics channel.
pub type DiagnosticsSender = mpsc::UnboundedSender<Diagnostic>;

/// Creates the diagnostics channel and spawns the reporter task draining it
/// to the log.
///
/// The reporter exits once every sender is dropped and resolves to the number
/// of diagnostics it saw.
pub fn spawn_reporter() -> (DiagnosticsSender, tokio::task::JoinHandle<usize>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Diagnostic>();
    let handle = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(diagnostic) = rx.recv().await {
            log::warn!("{diagnostic}");
            count += 1;
        }
        count
    });
    (tx, handle)
}
