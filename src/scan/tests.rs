//! Scan orchestration tests.

use super::*;
use crate::config::RETRY_MAX_ATTEMPTS;
use crate::dns::DnsError;
use crate::error_handling::{ErrorType, ScanStats};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Deterministic stand-in for the live resolver.
///
/// Unconfigured names answer with an empty record set; call counters let
/// tests observe retry behavior.
#[derive(Default)]
struct StubDns {
    mx: HashMap<String, Result<Vec<(u16, String)>, DnsError>>,
    txt: HashMap<String, Result<Vec<String>, DnsError>>,
    mx_calls: AtomicUsize,
    txt_calls: AtomicUsize,
}

#[async_trait]
impl crate::dns::DnsLookup for StubDns {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, DnsError> {
        self.mx_calls.fetch_add(1, Ordering::SeqCst);
        self.mx
            .get(domain)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsError> {
        self.txt_calls.fetch_add(1, Ordering::SeqCst);
        self.txt.get(name).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn context_for(
    stub: &Arc<StubDns>,
) -> (ScanContext, mpsc::UnboundedReceiver<Diagnostic>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ScanContext {
            resolver: Arc::clone(stub) as Arc<dyn crate::dns::DnsLookup>,
            diagnostics: tx,
            stats: Arc::new(ScanStats::new()),
        },
        rx,
    )
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Diagnostic>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    while let Ok(diagnostic) = rx.try_recv() {
        diagnostics.push(diagnostic);
    }
    diagnostics
}

#[tokio::test]
async fn test_empty_mx_is_not_an_error() {
    let mut stub = StubDns::default();
    stub.mx.insert("example.com".to_string(), Ok(Vec::new()));
    let stub = Arc::new(stub);
    let (ctx, mut rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "example.com").await;

    assert!(!posture.has_mx);
    assert!(drain(&mut rx).is_empty(), "no diagnostic for a clean empty answer");
    assert_eq!(ctx.stats.total(), 0);
}

#[tokio::test]
async fn test_mx_failure_records_exactly_one_diagnostic() {
    let mut stub = StubDns::default();
    stub.mx
        .insert("nomx.example".to_string(), Err(DnsError::NxDomain));
    let stub = Arc::new(stub);
    let (ctx, mut rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "nomx.example").await;

    assert!(!posture.has_mx);
    let diagnostics = drain(&mut rx);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].query, QueryKind::Mx);
    assert_eq!(diagnostics[0].error, DnsError::NxDomain);
    assert_eq!(ctx.stats.count(ErrorType::DnsMxLookupError), 1);
}

#[tokio::test]
async fn test_nxdomain_is_not_retried() {
    let mut stub = StubDns::default();
    stub.mx
        .insert("gone.example".to_string(), Err(DnsError::NxDomain));
    let stub = Arc::new(stub);
    let (ctx, _rx) = context_for(&stub);

    scan_domain(&ctx, "gone.example").await;

    assert_eq!(stub.mx_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_retried_then_accepted_as_final() {
    let mut stub = StubDns::default();
    stub.mx
        .insert("slow.example".to_string(), Err(DnsError::Timeout));
    let stub = Arc::new(stub);
    let (ctx, mut rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "slow.example").await;

    assert!(!posture.has_mx);
    assert_eq!(
        stub.mx_calls.load(Ordering::SeqCst),
        1 + RETRY_MAX_ATTEMPTS,
        "initial attempt plus bounded retries"
    );
    // Still only one diagnostic for the final failure
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_failure_is_retried() {
    let mut stub = StubDns::default();
    stub.txt
        .insert("flaky.example".to_string(), Err(DnsError::ServerFailure));
    let stub = Arc::new(stub);
    let (ctx, _rx) = context_for(&stub);

    scan_domain(&ctx, "flaky.example").await;

    // Apex TXT failed every time, _dmarc TXT answered on the first call
    assert_eq!(
        stub.txt_calls.load(Ordering::SeqCst),
        (1 + RETRY_MAX_ATTEMPTS) + 1
    );
}

#[tokio::test]
async fn test_fully_published_domain() {
    let mut stub = StubDns::default();
    stub.mx.insert(
        "example.com".to_string(),
        Ok(vec![(10, "mail.example.com.".to_string())]),
    );
    stub.txt.insert(
        "example.com".to_string(),
        Ok(vec!["v=spf1 -all".to_string()]),
    );
    stub.txt.insert(
        "_dmarc.example.com".to_string(),
        Ok(vec!["v=DMARC1; p=reject".to_string()]),
    );
    let stub = Arc::new(stub);
    let (ctx, mut rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "example.com").await;

    assert_eq!(
        posture,
        DomainPosture::new(
            "example.com".to_string(),
            true,
            Some("v=spf1 -all".to_string()),
            Some("v=DMARC1; p=reject".to_string()),
        )
    );
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_dmarc_failure_leaves_other_fields_alone() {
    let mut stub = StubDns::default();
    stub.mx.insert(
        "example.org".to_string(),
        Ok(vec![(5, "mx.example.org.".to_string())]),
    );
    stub.txt.insert(
        "example.org".to_string(),
        Ok(vec!["v=spf1 mx ~all".to_string()]),
    );
    stub.txt
        .insert("_dmarc.example.org".to_string(), Err(DnsError::Refused));
    let stub = Arc::new(stub);
    let (ctx, mut rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "example.org").await;

    assert!(posture.has_mx);
    assert_eq!(posture.spf_record.as_deref(), Some("v=spf1 mx ~all"));
    assert!(!posture.has_dmarc);
    assert_eq!(posture.dmarc_record, None);

    let diagnostics = drain(&mut rx);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].query, QueryKind::DmarcTxt);
}

#[tokio::test]
async fn test_presence_booleans_track_records() {
    let mut stub = StubDns::default();
    stub.txt.insert(
        "spf-only.example".to_string(),
        Ok(vec!["v=spf1 -all".to_string()]),
    );
    let stub = Arc::new(stub);
    let (ctx, _rx) = context_for(&stub);

    let posture = scan_domain(&ctx, "spf-only.example").await;

    assert_eq!(posture.has_spf, posture.spf_record.is_some());
    assert_eq!(posture.has_dmarc, posture.dmarc_record.is_some());
    assert!(posture.has_spf);
    assert!(!posture.has_dmarc);
}
