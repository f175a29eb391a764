use fgroups::grouping::Grouper;
use fgroups::scanner::FieldLimits;

fn names_for(grouper: &Grouper, fingerprint: &[u8]) -> Vec<Vec<u8>> {
    let fp = grouper.interner().get(fingerprint).unwrap();
    let mut names: Vec<Vec<u8>> = grouper
        .store()
        .get(fp)
        .unwrap()
        .members()
        .map(|sym| grouper.interner().resolve(sym).to_vec())
        .collect();
    names.sort();
    names
}

#[test]
fn test_oversized_fingerprint_does_not_desync_next_line() {
    let input = format!("{} stray name\nk a\nk b\n", "x".repeat(600));
    let mut grouper = Grouper::new(FieldLimits::default());
    let summary = grouper.ingest(input.as_bytes()).unwrap();

    assert_eq!(summary.oversized_fingerprints, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(grouper.store().len(), 1);
    assert_eq!(names_for(&grouper, b"k"), vec![b"a".to_vec(), b"b".to_vec()]);
}

#[test]
fn test_truncated_name_does_not_desync_next_line() {
    let long = "n".repeat(5000);
    let input = format!("k {}\nk short\n", long);
    let mut grouper = Grouper::new(FieldLimits::default());
    let summary = grouper.ingest(input.as_bytes()).unwrap();

    assert_eq!(summary.truncated_names, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(
        names_for(&grouper, b"k"),
        vec!["n".repeat(2047).into_bytes(), b"short".to_vec()]
    );
}

#[test]
fn test_truncated_names_collapse_when_prefix_matches() {
    let limits = FieldLimits::new(16, 4);
    let mut grouper = Grouper::new(limits);
    grouper.ingest(&b"k abcdXXX\nk abcdYYY\nk zz\n"[..]).unwrap();

    assert_eq!(names_for(&grouper, b"k"), vec![b"abcd".to_vec(), b"zz".to_vec()]);
}

#[test]
fn test_malformed_lines_contribute_nothing() {
    let mut grouper = Grouper::new(FieldLimits::default());
    let summary = grouper
        .ingest(&b"lonely\n\n   indented name\nk a\nk b\n"[..])
        .unwrap();

    assert_eq!(summary.malformed_lines, 3);
    assert_eq!(summary.records, 2);
    assert!(grouper.interner().get(b"lonely").is_none());
    assert!(grouper.interner().get(b"indented").is_none());
}

#[test]
fn test_crlf_input_keeps_carriage_return_in_name() {
    let mut grouper = Grouper::new(FieldLimits::default());
    grouper.ingest(&b"k a\r\nk a\n"[..]).unwrap();

    // "a\r" and "a" are different names.
    assert_eq!(names_for(&grouper, b"k"), vec![b"a".to_vec(), b"a\r".to_vec()]);
}

#[test]
fn test_custom_limits_apply() {
    let limits = FieldLimits::new(4, 8);
    let mut grouper = Grouper::new(limits);
    let summary = grouper
        .ingest(&b"abcd one\nabcde two\nabcd three\n"[..])
        .unwrap();

    assert_eq!(grouper.limits(), limits);
    assert_eq!(summary.oversized_fingerprints, 1);
    assert_eq!(
        names_for(&grouper, b"abcd"),
        vec![b"one".to_vec(), b"three".to_vec()]
    );
}
