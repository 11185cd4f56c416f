//! Record data model.
//!
//! A container holds named, typed records. The merge engine understands
//! histograms, scalar parameters, and tables; any other declared kind is
//! carried as `Opaque` and copied through verbatim.

pub mod histogram;
pub mod scalar;
pub mod table;

pub use histogram::{Axis, Histogram};
pub use scalar::Parameter;
pub use table::{Column, ColumnType, RowError, Table, Value};

use serde::{Deserialize, Serialize};

/// Canonical type names declared by the built-in record kinds. Producers
/// outside this set show up under their own names and classify as opaque.
pub mod type_names {
    pub const HISTOGRAM: &str = "histogram";
    pub const PARAMETER: &str = "parameter";
    pub const TABLE: &str = "table";
    pub const DIRECTORY: &str = "directory";
}

/// Payload of a record kind the merge engine does not understand.
///
/// Carried byte-for-byte so unknown producers survive a merge unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaquePayload {
    /// Kind name as declared by the producing side.
    pub type_name: String,
    pub bytes: Vec<u8>,
}

/// A named unit of data stored at one container path.
///
/// Directories are not a `Record` variant; they are structural and exist
/// only in the backend's tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Histogram(Histogram),
    Parameter(Parameter),
    Table(Table),
    Opaque(OpaquePayload),
}

impl Record {
    /// Declared kind name, as the backend reports it during enumeration.
    pub fn type_name(&self) -> &str {
        match self {
            Record::Histogram(_) => type_names::HISTOGRAM,
            Record::Parameter(_) => type_names::PARAMETER,
            Record::Table(_) => type_names::TABLE,
            Record::Opaque(payload) => &payload.type_name,
        }
    }
}
