//! Recursive tree walker.
//!
//! Enumerates the reference container's records in original order,
//! classifies each one, applies the matching strategy, and recurses into
//! sub-directories, reproducing the nesting in the output. Root and nested
//! directories share this single code path; the current path is an explicit
//! parameter. Each path is visited exactly once.

use crate::error::MergeError;
use crate::merge::classify::{classify, RecordClass};
use crate::merge::driver::MergeReport;
use crate::merge::{strategy, InputSet};
use crate::progress::ProgressSink;
use crate::record::Record;
use crate::store::{ContainerRead, ContainerWrite};
use crate::types::RecordPath;
use tracing::{debug, warn};

/// Count every entry (records and directories) reachable from `dir`.
///
/// Used to pre-size the progress total before the walk starts.
pub fn count_records(
    container: &dyn ContainerRead,
    dir: &RecordPath,
) -> Result<usize, MergeError> {
    let mut count = 0;
    for key in container.list(dir)? {
        count += 1;
        if classify(&key) == RecordClass::SubContainer {
            count += count_records(container, &dir.child(&key.name))?;
        }
    }
    Ok(count)
}

/// Walks the reference tree and drives the aggregation strategies.
pub struct TreeWalker<'a, 'p> {
    inputs: &'a InputSet<'a>,
    progress: &'p mut dyn ProgressSink,
    total: usize,
    report: MergeReport,
}

impl<'a, 'p> TreeWalker<'a, 'p> {
    /// `total` is the pre-counted number of reference-tree entries, used
    /// only for progress reporting.
    pub fn new(
        inputs: &'a InputSet<'a>,
        progress: &'p mut dyn ProgressSink,
        total: usize,
    ) -> Self {
        TreeWalker {
            inputs,
            progress,
            total,
            report: MergeReport::default(),
        }
    }

    /// Merge the whole tree into `out`, starting at the root.
    pub fn walk(&mut self, out: &mut dyn ContainerWrite) -> Result<(), MergeError> {
        self.merge_dir(&RecordPath::root(), out)
    }

    /// Consume the walker, yielding the accumulated counters.
    pub fn into_report(self) -> MergeReport {
        self.report
    }

    fn merge_dir(
        &mut self,
        dir: &RecordPath,
        out: &mut dyn ContainerWrite,
    ) -> Result<(), MergeError> {
        for key in self.inputs.reference().list(dir)? {
            let path = dir.child(&key.name);
            match classify(&key) {
                RecordClass::SubContainer => {
                    debug!(record = %path, "Merging sub-directory");
                    out.mkdir(&path)?;
                    self.report.directories += 1;
                    self.advance();
                    self.merge_dir(&path, out)?;
                }
                class => {
                    self.merge_record(class, &path, out)?;
                    self.advance();
                }
            }
        }
        Ok(())
    }

    fn merge_record(
        &mut self,
        class: RecordClass,
        path: &RecordPath,
        out: &mut dyn ContainerWrite,
    ) -> Result<(), MergeError> {
        // The reference defines the traversal, so the record exists there
        // by construction; a read-back miss means the backend is lying.
        let reference = match self.inputs.reference().get(path)? {
            Some(record) => record,
            None => {
                warn!(record = %path, "Record listed by reference input but unreadable; skipped");
                self.report.warnings += 1;
                return Ok(());
            }
        };

        match (class, &reference) {
            (RecordClass::Histogram, Record::Histogram(h)) => {
                self.report.warnings += strategy::merge_histograms(self.inputs, path, h, out)?;
                self.report.histograms += 1;
            }
            (RecordClass::Scalar, Record::Parameter(_)) => {
                self.report.warnings += strategy::merge_scalars(self.inputs, path, out)?;
                self.report.scalars += 1;
            }
            (RecordClass::Table, Record::Table(t)) => {
                self.report.warnings += strategy::merge_tables(self.inputs, path, t, out)?;
                self.report.tables += 1;
            }
            _ => {
                strategy::copy_opaque(path, &reference, out)?;
                self.report.opaque += 1;
            }
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.report.records += 1;
        self.progress.record(self.report.records, self.total);
    }
}
