//! Error type definitions.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Categories of failures counted during a scan.
///
/// These are aggregate counters; the per-failure detail (domain, error kind)
/// travels on the diagnostics channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// MX lookup failed for a domain
    DnsMxLookupError,
    /// Apex TXT lookup failed
    DnsTxtLookupError,
    /// `_dmarc.` TXT lookup failed
    DnsDmarcLookupError,
    /// A whole-domain scan hit the outer deadline
    DomainScanTimeout,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsMxLookupError => "DNS MX lookup error",
            ErrorType::DnsTxtLookupError => "DNS TXT lookup error",
            ErrorType::DnsDmarcLookupError => "DNS DMARC lookup error",
            ErrorType::DomainScanTimeout => "Domain scan timeout",
        }
    }
}
