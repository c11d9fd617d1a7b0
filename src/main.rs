//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_posture` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing summary output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mail_posture::initialization::init_logger_with;
use mail_posture::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the scan using the library
    match run_scan(config).await {
        Ok(report) => {
            // Print user-friendly summary; lookup failures are per-field
            // diagnostics, not a reason for a non-zero exit
            eprintln!(
                "✅ Scanned {} domain{} ({} with MX, {} with SPF, {} with DMARC, {} lookup failure{}) in {:.1}s",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.with_mx,
                report.with_spf,
                report.with_dmarc,
                report.lookup_failures,
                if report.lookup_failures == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("mail_posture error: {:#}", e);
            process::exit(1);
        }
    }
}
