//! DNS error taxonomy.
//!
//! Classifies resolver failures into the small set of outcomes the scanner
//! cares about. A clean answer with no records of the queried type (NODATA)
//! is not a failure and is mapped back to an empty record set here.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use thiserror::Error;

/// Failure modes of a single DNS query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DnsError {
    /// The queried name does not exist (authoritative negative).
    #[error("name does not exist (NXDOMAIN)")]
    NxDomain,

    /// No response within the configured deadline.
    #[error("query timed out")]
    Timeout,

    /// The resolver reported a server-side failure (SERVFAIL).
    #[error("server failure (SERVFAIL)")]
    ServerFailure,

    /// The resolver refused to answer the query.
    #[error("query refused (REFUSED)")]
    Refused,

    /// The response could not be decoded.
    #[error("malformed response")]
    Malformed,
}

impl DnsError {
    /// Whether a retry could plausibly produce a different answer.
    ///
    /// NXDOMAIN is authoritative and REFUSED is resolver policy; neither is
    /// retried. An undecodable response is assumed to stay undecodable.
    pub fn is_retriable(&self) -> bool {
        matches!(self, DnsError::Timeout | DnsError::ServerFailure)
    }
}

/// Maps a resolver error onto the scanner's outcome model.
///
/// `NoRecordsFound` with a `NOERROR` response code is NODATA: the name exists
/// but has no records of the queried type. That is a valid empty result, not
/// a failure.
pub(crate) fn lookup_outcome<T>(err: ResolveError) -> Result<Vec<T>, DnsError> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NoError => Ok(Vec::new()),
            code => Err(classify_response_code(code)),
        },
        ResolveErrorKind::Timeout => Err(DnsError::Timeout),
        ResolveErrorKind::Proto(_) => Err(DnsError::Malformed),
        // Message/Msg/Io/NoConnections all boil down to "the resolver side
        // broke", which retries may or may not cure
        _ => Err(DnsError::ServerFailure),
    }
}

/// Maps the response code of a negative answer onto a `DnsError`.
pub(crate) fn classify_response_code(code: ResponseCode) -> DnsError {
    match code {
        ResponseCode::NXDomain => DnsError::NxDomain,
        ResponseCode::Refused => DnsError::Refused,
        ResponseCode::FormErr => DnsError::Malformed,
        _ => DnsError::ServerFailure,
    }
}
