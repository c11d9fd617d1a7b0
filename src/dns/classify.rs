//! TXT record classification.
//!
//! SPF and DMARC detection is a prefix test on the raw record text, not a
//! parse of policy syntax. Both prefixes are matched case-sensitively, as
//! published policies are required to use the canonical spelling.

/// Returns the first TXT record that is an SPF policy.
///
/// SPF records start with `v=spf1`. Selection follows resolver response
/// order, so it is deterministic within a single response only.
pub fn classify_spf(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.starts_with("v=spf1"))
        .cloned()
}

/// Returns the first TXT record that is a DMARC policy.
///
/// DMARC records live at `_dmarc.<domain>` and start with `v=DMARC1`; the
/// caller is expected to pass records fetched from that label.
pub fn classify_dmarc(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.starts_with("v=DMARC1"))
        .cloned()
}
