//! mail_posture library: domain email-authentication posture scanning
//!
//! This library reads a stream of domain names and determines, for each one,
//! whether it publishes MX records, an SPF policy (`v=spf1` TXT at the apex),
//! and a DMARC policy (`v=DMARC1` TXT at `_dmarc.<domain>`), using live DNS
//! queries. Results come out as one CSV row per domain, in input order.
//!
//! # Example
//!
//! ```no_run
//! use mail_posture::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrency: 8,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!(
//!     "Scanned {} domains: {} with MX, {} with SPF, {} with DMARC",
//!     report.total_domains, report.with_mx, report.with_spf, report.with_dmarc
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;
pub mod report;
pub mod scan;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ErrorType, ScanStats};
pub use run::{run_scan, scan_stream, ScanReport};

// Internal run module (contains the main scanning loop)
mod run {
    use std::collections::BTreeMap;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, normalize_domain, print_error_statistics, shutdown_gracefully,
    };
    use crate::config::{Config, DOMAIN_SCAN_TIMEOUT, LOGGING_INTERVAL};
    use crate::dns::DnsLookup;
    use crate::error_handling::{ErrorType, ScanStats};
    use crate::initialization::{init_resolver, init_semaphore};
    use crate::report::PostureWriter;
    use crate::scan::{scan_domain, spawn_reporter, DomainPosture, ScanContext};

    /// Results of a completed scan.
    #[derive(Debug, Clone)]
    pub struct ScanReport {
        /// Number of domains scanned (one output row each)
        pub total_domains: usize,
        /// Domains publishing at least one MX record
        pub with_mx: usize,
        /// Domains publishing an SPF policy
        pub with_spf: usize,
        /// Domains publishing a DMARC policy
        pub with_dmarc: usize,
        /// Individual lookups that failed after retries
        pub lookup_failures: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    #[derive(Default)]
    struct RowCounts {
        total: usize,
        with_mx: usize,
        with_spf: usize,
        with_dmarc: usize,
    }

    fn emit_row<W: Write>(
        writer: &mut PostureWriter<W>,
        counts: &mut RowCounts,
        posture: &DomainPosture,
    ) -> Result<()> {
        writer.write_posture(posture)?;
        counts.total += 1;
        if posture.has_mx {
            counts.with_mx += 1;
        }
        if posture.has_spf {
            counts.with_spf += 1;
        }
        if posture.has_dmarc {
            counts.with_dmarc += 1;
        }
        Ok(())
    }

    /// Runs a scan with the provided configuration.
    ///
    /// This is the main entry point for the binary. It reads domains from the
    /// input file (or stdin for `-`), scans them against the live resolver,
    /// and writes the result table to the configured output (or stdout).
    ///
    /// Pressing Ctrl-C cancels the scan: in-flight lookups are abandoned and
    /// the rows that already completed are still written.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened, the output file
    /// cannot be created, or the input stream fails mid-read. Per-domain DNS
    /// failures are never fatal.
    pub async fn run_scan(config: Config) -> Result<ScanReport> {
        let resolver: Arc<dyn DnsLookup> =
            init_resolver(Duration::from_secs(config.query_timeout));

        let output: Box<dyn Write + Send> = match &config.output {
            Some(path) => Box::new(std::fs::File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?),
            None => Box::new(std::io::stdout()),
        };

        let cancel = CancellationToken::new();
        let interrupt_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, abandoning in-flight lookups");
                interrupt_cancel.cancel();
            }
        });

        if config.file.as_os_str() == "-" {
            info!("Reading domains from stdin");
            let input = BufReader::new(tokio::io::stdin());
            scan_stream(input, output, resolver, &config, cancel).await
        } else {
            let file = tokio::fs::File::open(&config.file)
                .await
                .context("Failed to open input file")?;
            scan_stream(BufReader::new(file), output, resolver, &config, cancel).await
        }
    }

    /// Scans every domain on `input` and writes the result table to `output`.
    ///
    /// This is the resolver-injected core of the scanner: `run_scan` passes
    /// the live hickory-backed resolver, tests pass a deterministic stub.
    ///
    /// Domains are processed by a bounded pool of `config.max_concurrency`
    /// workers; completions arrive in any order and are reassembled into
    /// input order before emission. Cancelling the token stops intake,
    /// abandons whatever is still in flight, and flushes the completed rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the input stream fails mid-read or the output
    /// stream rejects a write; whatever rows were produced before the
    /// failure have already been written.
    pub async fn scan_stream<R>(
        input: R,
        output: Box<dyn Write + Send>,
        resolver: Arc<dyn DnsLookup>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Result<ScanReport>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = std::time::Instant::now();

        let semaphore = init_semaphore(config.max_concurrency);
        let stats = Arc::new(ScanStats::new());
        let (diagnostics, reporter) = spawn_reporter();

        let ctx = ScanContext {
            resolver,
            diagnostics,
            stats: Arc::clone(&stats),
        };

        let mut writer = PostureWriter::new(output)?;
        let mut counts = RowCounts::default();

        let completed = Arc::new(AtomicUsize::new(0));

        let cancel_logging = cancel.child_token();
        let completed_for_logging = Arc::clone(&completed);
        let logging_task = tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &completed_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        });

        let mut tasks = FuturesUnordered::new();
        let mut lines = input.lines();
        let mut next_index = 0usize;
        let mut read_error: Option<std::io::Error> = None;

        loop {
            let line = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                line = lines.next_line() => match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        read_error = Some(e);
                        break;
                    }
                },
            };

            let Some(domain) = normalize_domain(&line) else {
                continue;
            };

            // The permit bounds how many domains are in flight at once; it
            // rides inside the task and frees a slot on completion
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("Semaphore closed, skipping domain: {domain}");
                        continue;
                    }
                },
            };

            let index = next_index;
            next_index += 1;

            let task_ctx = ctx.clone();
            let completed_clone = Arc::clone(&completed);
            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                let posture = match tokio::time::timeout(
                    DOMAIN_SCAN_TIMEOUT,
                    scan_domain(&task_ctx, &domain),
                )
                .await
                {
                    Ok(posture) => posture,
                    Err(_) => {
                        warn!("Scan timed out for {domain}");
                        task_ctx.stats.increment(ErrorType::DomainScanTimeout);
                        DomainPosture::new(domain, false, None, None)
                    }
                };

                completed_clone.fetch_add(1, Ordering::SeqCst);
                (index, posture)
            }));
        }

        // Completion order is unconstrained; early finishers park here until
        // the next expected index arrives
        let mut pending: BTreeMap<usize, DomainPosture> = BTreeMap::new();
        let mut next_emit = 0usize;
        let mut cancelled = false;

        loop {
            let task_result = tokio::select! {
                biased;
                _ = cancel.cancelled(), if !cancelled => {
                    cancelled = true;
                    for task in tasks.iter() {
                        task.abort();
                    }
                    continue;
                }
                result = tasks.next() => match result {
                    Some(result) => result,
                    None => break,
                },
            };

            match task_result {
                Ok((index, posture)) => {
                    pending.insert(index, posture);
                    while let Some(posture) = pending.remove(&next_emit) {
                        emit_row(&mut writer, &mut counts, &posture)?;
                        next_emit += 1;
                    }
                }
                Err(join_error) => {
                    if join_error.is_cancelled() {
                        continue;
                    }
                    warn!("Scan task panicked: {:?}", join_error);
                }
            }
        }

        // A clean run drains the buffer through the contiguous flush above;
        // abandoned or panicked workers leave gaps, and the rows beyond them
        // still come out in input order here
        for (_, posture) in std::mem::take(&mut pending) {
            emit_row(&mut writer, &mut counts, &posture)?;
        }

        writer.flush()?;

        // Dropping the last sender lets the reporter drain out and finish
        drop(ctx);
        let lookup_failures = reporter.await.unwrap_or_default();

        shutdown_gracefully(cancel, Some(logging_task)).await;

        log_progress(start_time, &completed);
        print_error_statistics(&stats);

        if let Some(e) = read_error {
            return Err(anyhow::Error::new(e).context("Failed to read from input stream"));
        }

        Ok(ScanReport {
            total_domains: counts.total,
            with_mx: counts.with_mx,
            with_spf: counts.with_spf,
            with_dmarc: counts.with_dmarc,
            lookup_failures,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
