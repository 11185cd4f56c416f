//! Named scalar-aggregate record.

use serde::{Deserialize, Serialize};

/// A single numeric value, e.g. a total generated-event count.
///
/// Always stored as `f64` regardless of the producing side's integer or
/// float subtype, so merging never narrows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub value: f64,
}

impl Parameter {
    pub fn new(value: f64) -> Self {
        Parameter { value }
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter { value }
    }
}

impl From<i64> for Parameter {
    fn from(value: i64) -> Self {
        Parameter {
            value: value as f64,
        }
    }
}
