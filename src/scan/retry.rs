//! Bounded retry of transient lookup failures.

use std::future::Future;
use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

use crate::config::{
    RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS,
};
use crate::dns::DnsError;

/// Creates the exponential backoff schedule for transient DNS failures.
///
/// The iterator is limited to `RETRY_MAX_ATTEMPTS` delays, bounding the total
/// number of queries per lookup to one initial attempt plus that many
/// retries.
pub fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS)
}

/// Runs `lookup`, retrying timeouts and server failures on the backoff
/// schedule.
///
/// NXDOMAIN is an authoritative negative and is never retried; neither are
/// refusals or undecodable responses.
pub async fn lookup_with_retry<T, F, Fut>(lookup: F) -> Result<T, DnsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DnsError>>,
{
    RetryIf::spawn(retry_strategy(), lookup, DnsError::is_retriable).await
}
