use fgroups::grouping::Grouper;
use fgroups::output::TextOutput;
use fgroups::scanner::FieldLimits;

/// Group the input and return each reported group as a sorted list of names,
/// with the groups themselves sorted. Group order is not part of the contract.
fn grouped(input: &str) -> Vec<Vec<String>> {
    let mut grouper = Grouper::new(FieldLimits::default());
    grouper.ingest(input.as_bytes()).unwrap();
    let mut groups: Vec<Vec<String>> = grouper
        .report()
        .iter()
        .map(|g| {
            let mut names: Vec<String> = g
                .names
                .iter()
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .collect();
            names.sort();
            names
        })
        .collect();
    groups.sort();
    groups
}

fn text_report(input: &str) -> String {
    let mut grouper = Grouper::new(FieldLimits::default());
    grouper.ingest(input.as_bytes()).unwrap();
    let report = grouper.report();
    String::from_utf8(TextOutput::new(&report).to_bytes().unwrap()).unwrap()
}

#[test]
fn test_singleton_group_is_suppressed() {
    let input = "abc123 file1.txt\nabc123 file2.txt\nxyz999 file3.txt\n";
    assert_eq!(grouped(input), vec![vec!["file1.txt", "file2.txt"]]);

    let text = text_report(input);
    let mut lines: Vec<&str> = text.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["file1.txt", "file2.txt"]);
    assert!(!text.contains("file3.txt"));
}

#[test]
fn test_malformed_first_line_is_dropped() {
    let input = "abc\nxyz one\nxyz two\n";
    assert_eq!(grouped(input), vec![vec!["one", "two"]]);
}

#[test]
fn test_duplicate_names_collapse() {
    let input = "k1 same\nk1 same\nk1 other\n";
    assert_eq!(grouped(input), vec![vec!["other", "same"]]);

    let text = text_report(input);
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_two_groups_have_one_blank_line_between() {
    let input = "a x1\nb y1\na x2\nb y2\nc lonely\n";
    let text = text_report(input);

    let blocks: Vec<&str> = text.trim_end_matches('\n').split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(!text.starts_with('\n'));
    assert!(!text.ends_with("\n\n"));

    let mut block_sets: Vec<Vec<&str>> = blocks
        .iter()
        .map(|b| {
            let mut names: Vec<&str> = b.lines().collect();
            names.sort();
            names
        })
        .collect();
    block_sets.sort();
    assert_eq!(block_sets, vec![vec!["x1", "x2"], vec!["y1", "y2"]]);
}

#[test]
fn test_no_shared_fingerprints_prints_nothing() {
    assert!(text_report("a 1\nb 2\nc 3\n").is_empty());
    assert!(text_report("").is_empty());
}

#[test]
fn test_names_with_spaces_are_kept_whole() {
    let input = "h1 My Documents/report final.pdf\nh1 backup/report final.pdf\n";
    assert_eq!(
        grouped(input),
        vec![vec![
            "My Documents/report final.pdf",
            "backup/report final.pdf"
        ]]
    );
}

#[test]
fn test_tab_separated_checksum_output() {
    let input = "d41d8cd98f00b204e9800998ecf8427e\t./empty1\nd41d8cd98f00b204e9800998ecf8427e\t./empty2\n";
    assert_eq!(grouped(input), vec![vec!["./empty1", "./empty2"]]);
}

#[test]
fn test_same_name_under_two_fingerprints() {
    let input = "k1 shared\nk2 shared\nk1 other\n";
    assert_eq!(grouped(input), vec![vec!["other", "shared"]]);
}

#[test]
fn test_store_holds_one_group_per_fingerprint() {
    let mut grouper = Grouper::new(FieldLimits::default());
    grouper
        .ingest(&b"a 1\nb 2\na 3\nbad\nc 4\na 1\n"[..])
        .unwrap();
    assert_eq!(grouper.store().len(), 3);
    assert_eq!(grouper.store().total_members(), 4);
}
