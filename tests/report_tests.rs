//! Report entity tests: builders, body accumulation, timestamp validation.

use issuerelay::Report;

// --- construction ---

#[test]
fn test_new_report_defaults() {
    let report = Report::new("crash in worker");
    assert_eq!(report.title, "crash in worker");
    assert_eq!(report.body, "");
    assert_eq!(report.milestone, "");
    assert!(report.labels.is_empty());
    assert!(report.assignees.is_empty());
    assert!(!report.is_submitted());
}

#[test]
fn test_new_report_populates_created_at() {
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let report = Report::new("t");
    assert!(report.created_at() >= before);
    assert!(report.created_at() > 0);
}

#[test]
fn test_from_error_title_is_error_display() {
    let err = anyhow::anyhow!("at Foo.bar(Foo.java:1)").context("NullPointerException");
    let report = Report::from_error(&err, "");
    assert_eq!(report.title, "NullPointerException");
}

#[test]
fn test_from_error_body_has_preformatted_trace_block() {
    let err = anyhow::anyhow!("at Foo.bar(Foo.java:1)").context("NullPointerException");
    let report = Report::from_error(&err, "seen twice today");
    assert!(report.body.starts_with("<details><summary>Stacktrace:</summary>\n```\n"));
    assert!(report.body.contains("at Foo.bar(Foo.java:1)"));
    assert!(report.body.contains("```\n</details>\n\nseen twice today"));
}

#[test]
fn test_from_error_populates_created_at() {
    let err = anyhow::anyhow!("boom");
    assert!(Report::from_error(&err, "").created_at() > 0);
}

// --- body accumulation ---

#[test]
fn test_append_body_adds_line_separator_each_time() {
    let mut report = Report::new("t");
    report.append_body("first").append_body("second").append_body("");
    assert_eq!(report.body, "first\nsecond\n\n");
}

#[test]
fn test_append_body_preserves_call_order() {
    let mut report = Report::new("t");
    for i in 0..5 {
        report.append_body(&format!("line {}", i));
    }
    assert_eq!(report.body, "line 0\nline 1\nline 2\nline 3\nline 4\n");
}

// --- mutators ---

#[test]
fn test_mutators_chain() {
    let mut report = Report::new("t");
    report
        .with_milestone("v1.0")
        .with_labels(vec!["bug".into(), "bot".into()])
        .with_assignees(vec!["alice".into()])
        .with_created_at(1_700_000_000);
    assert_eq!(report.milestone, "v1.0");
    assert_eq!(report.labels, vec!["bug".to_string(), "bot".to_string()]);
    assert_eq!(report.assignees, vec!["alice".to_string()]);
    assert_eq!(report.created_at(), 1_700_000_000);
}

#[test]
fn test_with_created_at_rejects_zero_and_negative() {
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let mut report = Report::new("t");
    report.with_created_at(0);
    assert!(report.created_at() >= before);

    report.with_created_at(-5);
    assert!(report.created_at() >= before);
}
