//! Kind-specific aggregation strategies.
//!
//! Every strategy receives the record's path, the input set, and an
//! explicit output destination. A record missing from a non-reference input
//! is a recoverable condition: it is logged, counted, and excluded from
//! that record's aggregate.

use crate::error::StoreError;
use crate::merge::InputSet;
use crate::record::{Histogram, Parameter, Record, Table};
use crate::store::ContainerWrite;
use crate::types::RecordPath;
use tracing::{debug, warn};

/// Merge a sampled distribution bin-wise.
///
/// The output starts as a zero-valued clone of the reference shape, so
/// binning is identical across merged outputs no matter which inputs
/// contributed. Each bin (guard bins included) gets the mean of the
/// per-input values and, as its uncertainty, their population standard
/// deviation. Bins with no contributing sample keep the zeroed default.
///
/// Returns the number of warnings raised.
pub fn merge_histograms(
    inputs: &InputSet<'_>,
    path: &RecordPath,
    reference: &Histogram,
    out: &mut dyn ContainerWrite,
) -> Result<usize, StoreError> {
    let mut warnings = 0;
    let mut present: Vec<Histogram> = Vec::with_capacity(inputs.len());

    for (label, container) in inputs.iter() {
        match container.get(path)? {
            Some(Record::Histogram(h)) => {
                if h.same_shape(reference) {
                    present.push(h);
                } else {
                    warn!(
                        record = %path,
                        input = label,
                        "Histogram shape differs from reference; input excluded"
                    );
                    warnings += 1;
                }
            }
            _ => {
                warn!(record = %path, input = label, "Histogram missing from input");
                warnings += 1;
            }
        }
    }

    let mut merged = reference.zeroed_like();
    for bin in 0..merged.bin_count() {
        let count = present.len();
        if count == 0 {
            continue;
        }
        let sum: f64 = present.iter().map(|h| h.value(bin)).sum();
        let sq_sum: f64 = present.iter().map(|h| h.value(bin) * h.value(bin)).sum();
        let mean = sum / count as f64;
        let stddev = if count == 1 {
            0.0
        } else {
            // Population variance; clamp tiny negative rounding residue.
            (sq_sum / count as f64 - mean * mean).max(0.0).sqrt()
        };
        merged.set_bin(bin, mean, stddev);
    }

    out.write(path, Record::Histogram(merged))?;
    Ok(warnings)
}

/// Merge a scalar aggregate by summing across present inputs.
///
/// Sum rather than mean: scalars are count-like (e.g. total generated
/// events). Callers needing averaged scalars pre-normalize before merging.
pub fn merge_scalars(
    inputs: &InputSet<'_>,
    path: &RecordPath,
    out: &mut dyn ContainerWrite,
) -> Result<usize, StoreError> {
    let mut warnings = 0;
    let mut total = 0.0;

    for (label, container) in inputs.iter() {
        match container.get(path)? {
            Some(Record::Parameter(p)) => total += p.value,
            _ => {
                warn!(record = %path, input = label, "Parameter missing from input");
                warnings += 1;
            }
        }
    }

    out.write(path, Record::Parameter(Parameter::new(total)))?;
    Ok(warnings)
}

/// Merge a tabular sequence by concatenating rows in input-set order.
///
/// Input-internal row order is preserved; inputs missing the record
/// contribute zero rows. Row schemas are assumed identical across inputs.
pub fn merge_tables(
    inputs: &InputSet<'_>,
    path: &RecordPath,
    reference: &Table,
    out: &mut dyn ContainerWrite,
) -> Result<usize, StoreError> {
    let mut warnings = 0;
    let mut merged = reference.empty_like();

    for (label, container) in inputs.iter() {
        match container.get(path)? {
            Some(Record::Table(t)) => merged.append_rows(&t),
            _ => {
                warn!(record = %path, input = label, "Table missing from input");
                warnings += 1;
            }
        }
    }

    out.write(path, Record::Table(merged))?;
    Ok(warnings)
}

/// Copy a record of unrecognized kind verbatim from the reference input.
///
/// Best-effort compatibility default: no cross-input aggregation, no error.
pub fn copy_opaque(
    path: &RecordPath,
    reference: &Record,
    out: &mut dyn ContainerWrite,
) -> Result<(), StoreError> {
    debug!(record = %path, kind = reference.type_name(), "Copying unrecognized record from reference input");
    out.write(path, reference.clone())
}
