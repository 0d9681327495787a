use labeler_core::models::Record;
use labeler_core::records::{emit_records, parse_records, read_records, write_records, RecordsError};
use pretty_assertions::assert_eq;

#[test]
fn one_column_list_defaults_to_unclassified() {
    let input = "a.png\nb.png\n\nc.png\n";
    let records = parse_records(input.as_bytes()).unwrap();
    assert_eq!(
        records,
        vec![
            Record::unclassified("a.png"),
            Record::unclassified("b.png"),
            Record::unclassified("c.png"),
        ]
    );
}

#[test]
fn two_column_list_keeps_categories_and_blanks() {
    let input = "a.png,Correct\nb.png,\nc.png,\"DA | wide, faint\"\n";
    let records = parse_records(input.as_bytes()).unwrap();
    assert_eq!(records[0], Record::new("a.png", "Correct"));
    assert_eq!(records[1], Record::unclassified("b.png"));
    assert_eq!(records[2].category, "DA | wide, faint");
}

#[test]
fn mixed_widths_and_extra_columns_are_tolerated() {
    let input = "a.png\nb.png,DB,ignored\n";
    let records = parse_records(input.as_bytes()).unwrap();
    assert_eq!(records, vec![Record::unclassified("a.png"), Record::new("b.png", "DB")]);
}

#[test]
fn categories_that_look_like_missing_values_stay_text() {
    let records = parse_records("a.png,NA\nb.png,NaN\n".as_bytes()).unwrap();
    assert_eq!(records[0].category, "NA");
    assert_eq!(records[1].category, "NaN");
}

#[test]
fn written_records_read_back_identically() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("list.csv");
    let records = vec![
        Record::new("a.png", "Correct"),
        Record::unclassified("b.png"),
        Record::new("c.png", "DZ | has, comma"),
        Record::new("d \"quoted\".png", "DontKnow"),
    ];
    write_records(&path, &records).unwrap();
    assert_eq!(read_records(&path).unwrap(), records);
}

#[test]
fn output_always_has_two_columns() {
    let mut out = Vec::new();
    emit_records(&mut out, &[Record::unclassified("a.png"), Record::new("b.png", "DA")]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a.png,\nb.png,DA\n");
}

#[test]
fn missing_file_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let err = read_records(&temp.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, RecordsError::NotFound(_)));
}
