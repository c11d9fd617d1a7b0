//! Result emission.
//!
//! Renders the ordered posture stream as a CSV table. The emitter is fed
//! rows strictly in input order; restoring that order from out-of-order
//! worker completions is the orchestrator's job.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

use crate::scan::DomainPosture;

/// Column order of the result table.
const HEADER: [&str; 6] = [
    "domain",
    "hasMX",
    "hasSPF",
    "spfRecord",
    "hasDMARC",
    "dmarcRecord",
];

/// Streaming CSV emitter for scan results.
pub struct PostureWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> PostureWriter<W> {
    /// Creates the emitter and writes the header row.
    pub fn new(output: W) -> Result<Self> {
        let mut writer = Writer::from_writer(output);
        writer
            .write_record(HEADER)
            .context("Failed to write CSV header")?;
        Ok(Self { writer })
    }

    /// Appends one result row.
    ///
    /// Booleans render as `true`/`false`; absent records render as empty
    /// strings.
    pub fn write_posture(&mut self, posture: &DomainPosture) -> Result<()> {
        self.writer
            .write_record([
                posture.domain.as_str(),
                bool_field(posture.has_mx),
                bool_field(posture.has_spf),
                posture.spf_record.as_deref().unwrap_or(""),
                bool_field(posture.has_dmarc),
                posture.dmarc_record.as_deref().unwrap_or(""),
            ])
            .with_context(|| format!("Failed to write result row for {}", posture.domain))
    }

    /// Flushes buffered rows to the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush results")
    }
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
