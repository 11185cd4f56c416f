//! Record classification.
//!
//! Maps the kind a backend declares for an entry onto the closed set of
//! merge rules. Queried once per record during the walk; unknown kinds are
//! never an error, they fall through to pass-through copying.

use crate::record::type_names;
use crate::store::RecordKey;

/// The closed set of merge rules a record can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    /// Binned sampled distribution: merged bin-wise as mean plus spread.
    Histogram,
    /// Single scalar aggregate: merged as a sum.
    Scalar,
    /// Row-oriented tabular sequence: merged by concatenation.
    Table,
    /// Nested directory: merged recursively.
    SubContainer,
    /// Anything else: copied verbatim from the reference input.
    Opaque,
}

/// Classify a directory entry by its declared kind.
pub fn classify(key: &RecordKey) -> RecordClass {
    match key.type_name.as_str() {
        type_names::HISTOGRAM => RecordClass::Histogram,
        type_names::PARAMETER => RecordClass::Scalar,
        type_names::TABLE => RecordClass::Table,
        type_names::DIRECTORY => RecordClass::SubContainer,
        _ => RecordClass::Opaque,
    }
}
