//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::dns::HickoryDns;

/// Initializes the DNS resolver used for live scans.
///
/// Uses the default upstream configuration with the supplied per-query
/// deadline and reduced retry attempts so unresponsive servers fail fast;
/// retry policy above single queries belongs to the scan layer. `ndots` is
/// zeroed to prevent search-domain appending from rewriting queried names.
pub fn init_resolver(query_timeout: Duration) -> Arc<HickoryDns> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = query_timeout;
    opts.attempts = 2;
    opts.ndots = 0;

    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
    Arc::new(HickoryDns::new(Arc::new(resolver)))
}
