//! Comparison trace capture.
//!
//! Opt-in audit trail of rater consultations: one JSON object per line,
//! recorded as each comparison resolves (live or from the memo table).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::oracle::Verdict;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTrace {
    pub timestamp_ms: i64,
    /// Position of this comparison within the run, cache hits included.
    pub comparison_index: usize,
    pub item_a: String,
    pub item_b: String,
    pub verdict: Verdict,
    pub cached: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(String),
}

pub trait TraceSink {
    fn record(&mut self, event: ComparisonTrace) -> Result<(), TraceError>;
}

/// Writes one JSON line per comparison to a file.
pub struct JsonlTraceSink {
    writer: BufWriter<File>,
}

impl JsonlTraceSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered events, surfacing any write failure.
    pub fn finish(mut self) -> Result<(), TraceError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl TraceSink for JsonlTraceSink {
    fn record(&mut self, event: ComparisonTrace) -> Result<(), TraceError> {
        let line = serde_json::to_string(&event).map_err(|e| TraceError::Serde(e.to_string()))?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
