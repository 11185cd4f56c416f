//! End-to-end merge semantics over in-memory containers.

use genmerge::merge::{InputSet, MergeDriver};
use genmerge::progress::NullProgress;
use genmerge::record::{
    Column, ColumnType, Histogram, OpaquePayload, Parameter, Record, Table, Value,
};
use genmerge::store::{ContainerRead, ContainerWrite, MemoryContainer};
use genmerge::types::RecordPath;

fn merge(inputs: Vec<(&str, &MemoryContainer)>) -> (MemoryContainer, genmerge::merge::MergeReport) {
    let handles = inputs
        .into_iter()
        .map(|(label, c)| (label.to_string(), c as &dyn ContainerRead))
        .collect();
    let set = InputSet::new(handles).unwrap();
    let mut out = MemoryContainer::new();
    let mut progress = NullProgress;
    let report = MergeDriver::new(&mut progress)
        .merge(&set, &mut out)
        .unwrap();
    (out, report)
}

fn single_bin_hist(value: f64) -> Record {
    let mut h = Histogram::new_1d("h", 1, 0.0, 1.0);
    let idx = h.index(&[1]).unwrap();
    h.set_bin(idx, value, 0.0);
    Record::Histogram(h)
}

fn get_histogram(c: &MemoryContainer, path: &str) -> Histogram {
    match c.get(&RecordPath::parse(path)).unwrap().unwrap() {
        Record::Histogram(h) => h,
        other => panic!("expected histogram at {}, got {:?}", path, other),
    }
}

/// Collect the full path set (records and directories) of a container.
fn collect_paths(c: &dyn ContainerRead, dir: &RecordPath, into: &mut Vec<String>) {
    for key in c.list(dir).unwrap() {
        let path = dir.child(&key.name);
        into.push(path.to_string());
        if key.type_name == "directory" {
            collect_paths(c, &path, into);
        }
    }
}

#[test]
fn test_three_input_distribution_mean_and_stddev() {
    let mut a = MemoryContainer::new();
    let mut b = MemoryContainer::new();
    let mut c = MemoryContainer::new();
    let path = RecordPath::parse("h");
    a.write(&path, single_bin_hist(2.0)).unwrap();
    b.write(&path, single_bin_hist(4.0)).unwrap();
    c.write(&path, single_bin_hist(6.0)).unwrap();

    let (out, report) = merge(vec![("a", &a), ("b", &b), ("c", &c)]);
    assert_eq!(report.warnings, 0);

    let merged = get_histogram(&out, "h");
    let idx = merged.index(&[1]).unwrap();
    assert!((merged.value(idx) - 4.0).abs() < 1e-12);
    assert!((merged.error(idx) - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_guard_bins_participate_in_merge() {
    let mut a = MemoryContainer::new();
    let mut b = MemoryContainer::new();
    let path = RecordPath::parse("h");

    let mut ha = Histogram::new_1d("h", 1, 0.0, 1.0);
    let under = ha.index(&[0]).unwrap();
    let over = ha.index(&[2]).unwrap();
    ha.set_bin(under, 10.0, 0.0);
    ha.set_bin(over, 4.0, 0.0);
    let mut hb = ha.zeroed_like();
    hb.set_bin(under, 20.0, 0.0);
    hb.set_bin(over, 4.0, 0.0);
    a.write(&path, Record::Histogram(ha)).unwrap();
    b.write(&path, Record::Histogram(hb)).unwrap();

    let (out, _) = merge(vec![("a", &a), ("b", &b)]);
    let merged = get_histogram(&out, "h");
    assert_eq!(merged.value(under), 15.0);
    assert_eq!(merged.error(under), 5.0);
    assert_eq!(merged.value(over), 4.0);
    assert_eq!(merged.error(over), 0.0);
}

#[test]
fn test_scalar_records_are_summed() {
    let mut a = MemoryContainer::new();
    let mut b = MemoryContainer::new();
    let path = RecordPath::parse("nEvents");
    a.write(&path, Record::Parameter(Parameter::new(1000.0)))
        .unwrap();
    b.write(&path, Record::Parameter(Parameter::new(1500.0)))
        .unwrap();

    let (out, _) = merge(vec![("a", &a), ("b", &b)]);
    match out.get(&path).unwrap().unwrap() {
        Record::Parameter(p) => assert_eq!(p.value, 2500.0),
        other => panic!("expected parameter, got {:?}", other),
    }
}

#[test]
fn test_missing_distribution_merged_from_present_input_only() {
    let mut a = MemoryContainer::new();
    let b = MemoryContainer::new(); // missing the record entirely
    let path = RecordPath::parse("h");
    a.write(&path, single_bin_hist(3.0)).unwrap();

    let (out, report) = merge(vec![("a", &a), ("b", &b)]);
    assert_eq!(report.warnings, 1);

    let merged = get_histogram(&out, "h");
    let idx = merged.index(&[1]).unwrap();
    assert_eq!(merged.value(idx), 3.0);
    assert_eq!(merged.error(idx), 0.0);
}

#[test]
fn test_output_path_set_matches_reference_exactly() {
    let mut a = MemoryContainer::new();
    a.write(
        &RecordPath::parse("nEvents"),
        Record::Parameter(Parameter::new(1.0)),
    )
    .unwrap();
    a.mkdir(&RecordPath::parse("pairs")).unwrap();
    a.write(&RecordPath::parse("pairs/mass"), single_bin_hist(1.0))
        .unwrap();
    a.mkdir(&RecordPath::parse("pairs/fine")).unwrap();
    a.write(
        &RecordPath::parse("pairs/fine/count"),
        Record::Parameter(Parameter::new(2.0)),
    )
    .unwrap();

    // Second input misses everything below the root scalar.
    let mut b = MemoryContainer::new();
    b.write(
        &RecordPath::parse("nEvents"),
        Record::Parameter(Parameter::new(1.0)),
    )
    .unwrap();

    let (out, report) = merge(vec![("a", &a), ("b", &b)]);
    assert!(report.warnings > 0);

    let mut expected = Vec::new();
    collect_paths(&a, &RecordPath::root(), &mut expected);
    let mut actual = Vec::new();
    collect_paths(&out, &RecordPath::root(), &mut actual);
    assert_eq!(actual, expected);
}

#[test]
fn test_unknown_kind_copied_verbatim_from_reference() {
    let blob = Record::Opaque(OpaquePayload {
        type_name: "canvas".to_string(),
        bytes: vec![1, 2, 3, 4],
    });
    let mut a = MemoryContainer::new();
    a.write(&RecordPath::parse("display"), blob.clone()).unwrap();

    let mut b = MemoryContainer::new();
    b.write(
        &RecordPath::parse("display"),
        Record::Opaque(OpaquePayload {
            type_name: "canvas".to_string(),
            bytes: vec![9, 9, 9],
        }),
    )
    .unwrap();

    let (out, report) = merge(vec![("a", &a), ("b", &b)]);
    assert_eq!(report.opaque, 1);
    assert_eq!(report.warnings, 0);
    // Only the reference input's payload survives.
    assert_eq!(out.get(&RecordPath::parse("display")).unwrap().unwrap(), blob);
}

#[test]
fn test_table_rows_concatenate_in_input_order() {
    let schema = vec![Column::new("id", ColumnType::Int)];
    let mut containers = Vec::new();
    for base in [0i64, 10, 20] {
        let mut t = Table::new(schema.clone());
        t.push_row(vec![Value::Int(base)]).unwrap();
        t.push_row(vec![Value::Int(base + 1)]).unwrap();
        let mut c = MemoryContainer::new();
        c.write(&RecordPath::parse("rows"), Record::Table(t)).unwrap();
        containers.push(c);
    }

    let (out, _) = merge(vec![
        ("a", &containers[0]),
        ("b", &containers[1]),
        ("c", &containers[2]),
    ]);
    match out.get(&RecordPath::parse("rows")).unwrap().unwrap() {
        Record::Table(t) => {
            let ids: Vec<i64> = t
                .rows()
                .iter()
                .map(|row| match row[0] {
                    Value::Int(id) => id,
                    _ => panic!("expected int id"),
                })
                .collect();
            assert_eq!(ids, vec![0, 1, 10, 11, 20, 21]);
        }
        other => panic!("expected table, got {:?}", other),
    }
}
