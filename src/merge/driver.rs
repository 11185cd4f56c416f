//! Merge driver.
//!
//! The only component aware of the overall run lifecycle: it pre-counts the
//! reference tree for progress, runs the walker once at the root, and
//! returns the per-kind counters. Output finalization (flush/close) stays
//! with the caller.

use crate::error::MergeError;
use crate::merge::walker::{count_records, TreeWalker};
use crate::merge::InputSet;
use crate::progress::ProgressSink;
use crate::store::ContainerWrite;
use crate::types::RecordPath;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Counters accumulated over one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Entries visited, directories included.
    pub records: usize,
    pub histograms: usize,
    pub scalars: usize,
    pub tables: usize,
    pub directories: usize,
    pub opaque: usize,
    /// Recoverable conditions reported during the run.
    pub warnings: usize,
}

/// Orchestrates one merge run.
pub struct MergeDriver<'p> {
    progress: &'p mut dyn ProgressSink,
}

impl<'p> MergeDriver<'p> {
    pub fn new(progress: &'p mut dyn ProgressSink) -> Self {
        MergeDriver { progress }
    }

    /// Merge every record of the reference tree into `out`.
    ///
    /// The input-set size precondition is enforced when the [`InputSet`] is
    /// built; output creation failures surface from the caller that opened
    /// the output container.
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn merge(
        &mut self,
        inputs: &InputSet<'_>,
        out: &mut dyn ContainerWrite,
    ) -> Result<MergeReport, MergeError> {
        let start = Instant::now();
        info!("Merge starting");

        let total = count_records(inputs.reference(), &RecordPath::root())?;
        let mut walker = TreeWalker::new(inputs, &mut *self.progress, total);
        walker.walk(out)?;
        let report = walker.into_report();

        info!(
            records = report.records,
            warnings = report.warnings,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Merge finished"
        );
        Ok(report)
    }
}
