//! Shared fixture builders for integration tests.

use genmerge::record::{Column, ColumnType, Histogram, Parameter, Record, Table, Value};
use genmerge::store::{ContainerWrite, FileContainer};
use genmerge::types::RecordPath;
use std::fs;
use std::path::Path;

/// One parallel run's worth of fixture data.
pub struct RunData {
    pub n_events: f64,
    /// Content of the single in-range bin of the "mass" histogram.
    pub mass_bin: f64,
    /// Rows of the "hits" table, as (id, energy).
    pub hits: Vec<(i64, f64)>,
}

/// Build the standard fixture tree into a writable container:
///
/// ```text
/// /nEvents            parameter
/// /mass               histogram (1 bin + guard bins)
/// /hits               table (id:int, energy:float)
/// /pairs/             directory
/// /pairs/angle        histogram
/// ```
pub fn populate_run(container: &mut dyn ContainerWrite, data: &RunData) {
    container
        .write(
            &RecordPath::parse("nEvents"),
            Record::Parameter(Parameter::new(data.n_events)),
        )
        .unwrap();

    let mut mass = Histogram::new_1d("mass", 1, 0.0, 1.0);
    let idx = mass.index(&[1]).unwrap();
    mass.set_bin(idx, data.mass_bin, 0.0);
    container
        .write(&RecordPath::parse("mass"), Record::Histogram(mass))
        .unwrap();

    let mut hits = Table::new(vec![
        Column::new("id", ColumnType::Int),
        Column::new("energy", ColumnType::Float),
    ]);
    for &(id, energy) in &data.hits {
        hits.push_row(vec![Value::Int(id), Value::Float(energy)])
            .unwrap();
    }
    container
        .write(&RecordPath::parse("hits"), Record::Table(hits))
        .unwrap();

    container.mkdir(&RecordPath::parse("pairs")).unwrap();
    let mut angle = Histogram::new_1d("angle", 2, 0.0, 3.2);
    angle.fill_weighted(&[1.0], data.mass_bin);
    container
        .write(&RecordPath::parse("pairs/angle"), Record::Histogram(angle))
        .unwrap();
}

/// Create `<workspace>/<dir>/<filename>` holding the standard fixture.
pub fn seed_run_file(workspace: &Path, dir: &str, filename: &str, data: &RunData) {
    let run_dir = workspace.join(dir);
    fs::create_dir(&run_dir).unwrap();
    let mut container = FileContainer::create(run_dir.join(filename)).unwrap();
    populate_run(&mut container, data);
    container.flush().unwrap();
}
