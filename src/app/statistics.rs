//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ScanStats};

/// Prints per-category lookup-failure counts to the log.
///
/// Quiet when the scan had no failures.
pub fn print_error_statistics(stats: &ScanStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }

    info!("Lookup failure counts ({} total):", total);
    for error_type in ErrorType::iter() {
        let count = stats.count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}
