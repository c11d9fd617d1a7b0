//! Input line validation and normalization.

use log::warn;

use crate::config::MAX_DOMAIN_LENGTH;

/// Validates and normalizes one input line into a domain name.
///
/// Trims surrounding whitespace and returns `None` for blank lines and `#`
/// comments, which produce no output row. Names longer than DNS allows are
/// skipped with a warning rather than queried.
pub fn normalize_domain(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    if trimmed.len() > MAX_DOMAIN_LENGTH {
        let preview: String = trimmed.chars().take(50).collect();
        warn!(
            "Skipping domain exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_DOMAIN_LENGTH,
            preview
        );
        return None;
    }

    Some(trimmed.to_string())
}
