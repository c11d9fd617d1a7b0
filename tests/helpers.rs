// Shared test helpers: a deterministic, instrumented stub resolver and an
// inspectable output buffer.
//
// This module provides common utilities used across multiple test files to
// reduce duplication.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use mail_posture::dns::{DnsError, DnsLookup};
use mail_posture::{scan_stream, Config, ScanReport};

/// Deterministic stand-in for the live resolver.
///
/// Unconfigured names answer with an empty record set. Optional per-name
/// delays simulate slow servers, and an in-flight gauge exposes the
/// high-water mark of concurrent queries.
#[derive(Default)]
pub struct StubDns {
    pub mx: HashMap<String, Result<Vec<(u16, String)>, DnsError>>,
    pub txt: HashMap<String, Result<Vec<String>, DnsError>>,
    /// Artificial latency keyed by queried name, applied to every query for
    /// that name.
    pub delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubDns {
    /// Registers a fully-specified posture for a domain: its MX hosts, apex
    /// TXT records, and `_dmarc.` TXT records.
    #[allow(dead_code)] // Used by other test files
    pub fn publish(
        &mut self,
        domain: &str,
        mx: &[(u16, &str)],
        apex_txt: &[&str],
        dmarc_txt: &[&str],
    ) {
        self.mx.insert(
            domain.to_string(),
            Ok(mx.iter().map(|(p, h)| (*p, h.to_string())).collect()),
        );
        self.txt.insert(
            domain.to_string(),
            Ok(apex_txt.iter().map(|s| s.to_string()).collect()),
        );
        self.txt.insert(
            format!("_dmarc.{domain}"),
            Ok(dmarc_txt.iter().map(|s| s.to_string()).collect()),
        );
    }

    /// Highest number of queries that were in flight at the same moment.
    #[allow(dead_code)] // Used by other test files
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer<T: Clone>(
        &self,
        name: &str,
        table: &HashMap<String, Result<Vec<T>, DnsError>>,
    ) -> Result<Vec<T>, DnsError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        let result = table.get(name).cloned().unwrap_or_else(|| Ok(Vec::new()));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl DnsLookup for StubDns {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, DnsError> {
        self.answer(domain, &self.mx).await
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError> {
        self.answer(name, &self.txt).await
    }
}

/// Clonable in-memory output sink whose contents stay inspectable after the
/// scan consumed its writer half.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    #[allow(dead_code)] // Used by other test files
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf8 output")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs a full scan of `input` against the stub and returns the rendered
/// CSV output alongside the report.
#[allow(dead_code)] // Used by other test files
pub async fn scan_to_string(
    stub: Arc<StubDns>,
    input: &str,
    config: &Config,
    cancel: CancellationToken,
) -> (String, ScanReport) {
    let buf = SharedBuf::default();
    let report = scan_stream(
        input.as_bytes(),
        Box::new(buf.clone()),
        stub as Arc<dyn DnsLookup>,
        config,
        cancel,
    )
    .await
    .expect("scan should not fail on stub input");
    (buf.contents(), report)
}
