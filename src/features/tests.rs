use super::*;
use crate::descriptors::FeatureTable;
use proptest::prelude::*;

const CONSTANT: [usize; 5] = [2, 5, 9, 14, 19];

/// 50 rows x 20 binary columns; the columns in `CONSTANT` never vary.
fn fingerprint_table() -> FeatureTable {
    let columns = (0..20).map(|c| format!("PubchemFP{c}")).collect();
    let mut table = FeatureTable::new(columns);
    for row in 0..50 {
        let values = (0..20)
            .map(|c| {
                if CONSTANT.contains(&c) {
                    (c % 2) as f64
                } else {
                    ((row / (c % 4 + 1)) % 2) as f64
                }
            })
            .collect();
        table.push_row(format!("CHEMBL{row}"), values).unwrap();
    }
    table
}

#[test]
fn test_drops_exactly_the_constant_columns() {
    let table = fingerprint_table();
    let selection = VarianceThreshold::default().select(&table).unwrap();

    assert_eq!(selection.schema.len(), 15);
    let expected: Vec<String> = (0..20)
        .filter(|c| !CONSTANT.contains(c))
        .map(|c| format!("PubchemFP{c}"))
        .collect();
    assert_eq!(selection.schema.columns(), expected.as_slice());
    assert_eq!(selection.dropped.len(), 5);
    assert_eq!(selection.kept.len() + selection.dropped.len(), 20);
}

#[test]
fn test_selection_is_idempotent() {
    let table = fingerprint_table();
    let first = VarianceThreshold::default().select(&table).unwrap();
    let second = VarianceThreshold::default().select(&table).unwrap();
    assert_eq!(first, second);

    let projected = first.schema.project(&table).unwrap();
    let again = VarianceThreshold::default().select(&projected).unwrap();
    assert_eq!(again.schema, first.schema);
}

#[test]
fn test_near_constant_column_is_dropped() {
    let mut table = FeatureTable::new(vec!["skewed".into(), "balanced".into()]);
    for row in 0..10 {
        let skewed = if row == 0 { 1.0 } else { 0.0 };
        table.push_row(format!("m{row}"), vec![skewed, (row % 2) as f64]).unwrap();
    }
    let selection = VarianceThreshold::bernoulli(0.8).select(&table).unwrap();
    assert_eq!(selection.schema.columns(), ["balanced"]);
    assert_eq!(selection.dropped, vec!["skewed".to_string()]);
    assert!((selection.variances[0] - 0.09).abs() < 1e-12);
    assert!((selection.variances[1] - 0.25).abs() < 1e-12);
}

#[test]
fn test_threshold_value() {
    assert!((VarianceThreshold::default().threshold() - 0.16).abs() < 1e-12);
    assert_eq!(VarianceThreshold::new(0.0).threshold(), 0.0);
}

#[test]
fn test_selection_errors() {
    let empty = FeatureTable::new(vec!["a".into()]);
    assert!(matches!(
        VarianceThreshold::default().select(&empty),
        Err(SchemaError::EmptyTable)
    ));

    let mut constant = FeatureTable::new(vec!["a".into(), "b".into()]);
    constant.push_row("x", vec![1.0, 0.0]).unwrap();
    constant.push_row("y", vec![1.0, 0.0]).unwrap();
    assert!(matches!(
        VarianceThreshold::default().select(&constant),
        Err(SchemaError::NoFeatures)
    ));
}

#[test]
fn test_project_reorders_and_ignores_extras() {
    let mut table = FeatureTable::new(vec!["a".into(), "b".into(), "c".into()]);
    table.push_row("m1", vec![1.0, 2.0, 3.0]).unwrap();

    let schema = FeatureSchema::new(vec!["c".into(), "a".into()]);
    let projected = schema.project(&table).unwrap();
    assert_eq!(projected.columns(), ["c", "a"]);
    assert_eq!(projected.row(0), &[3.0, 1.0]);
    assert_eq!(projected.labels(), ["m1"]);
}

#[test]
fn test_project_reports_missing_columns() {
    let mut table = FeatureTable::new(vec!["a".into(), "c".into()]);
    table.push_row("m1", vec![1.0, 3.0]).unwrap();

    let schema = FeatureSchema::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
    match schema.project(&table) {
        Err(SchemaError::Mismatch { missing, expected }) => {
            assert_eq!(missing, vec!["b".to_string(), "d".to_string()]);
            assert_eq!(expected, 4);
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn test_schema_text_round_trip() {
    let schema = FeatureSchema::new(vec!["PubchemFP12".into(), "PubchemFP3".into()]);
    let mut buffer = Vec::new();
    schema.write_to(&mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "PubchemFP12\nPubchemFP3\n");
    assert_eq!(FeatureSchema::read_from(buffer.as_slice()).unwrap(), schema);

    let padded = "  PubchemFP12 \r\n\nPubchemFP3\n\n";
    assert_eq!(FeatureSchema::read_from(padded.as_bytes()).unwrap(), schema);

    assert!(matches!(FeatureSchema::read_from("\n\n".as_bytes()), Err(SchemaError::NoFeatures)));
}

#[test]
fn test_mismatch_message_is_bounded() {
    let err = SchemaError::Mismatch {
        missing: (0..20).map(|i| format!("col{i}")).collect(),
        expected: 40,
    };
    let message = err.to_string();
    assert!(message.contains("20 of 40"));
    assert!(message.contains("12 more"));
}

proptest! {
    #[test]
    fn survivors_survive_reselection(
        rows in proptest::collection::vec(proptest::collection::vec(0u8..2, 6), 2..40)
    ) {
        let mut table = FeatureTable::new((0..6).map(|c| format!("f{c}")).collect());
        for (i, row) in rows.iter().enumerate() {
            table.push_row(format!("m{i}"), row.iter().map(|&v| v as f64).collect()).unwrap();
        }
        if let Ok(selection) = VarianceThreshold::default().select(&table) {
            prop_assert_eq!(selection.kept.len() + selection.dropped.len(), 6);
            let projected = selection.schema.project(&table).unwrap();
            let again = VarianceThreshold::default().select(&projected).unwrap();
            prop_assert_eq!(again.schema, selection.schema);
        }
    }
}
