//! Store tests: open semantics, insert, and row round-trips.

use issuerelay::{RelayError, ReportRow, ReportStore};

fn row(title: &str, labels: &str) -> ReportRow {
    ReportRow {
        title: title.to_string(),
        body: String::new(),
        milestone: String::new(),
        labels: labels.to_string(),
        assignees: String::new(),
        created_at: 1_700_000_000,
    }
}

#[test]
fn test_open_in_memory_sentinel() {
    let store = ReportStore::open(":memory:").unwrap();
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_open_missing_path_is_resource_not_found() {
    let missing = std::env::temp_dir().join("issuerelay_no_such_db");
    let err = ReportStore::open(missing.to_str().unwrap()).unwrap_err();
    match err {
        RelayError::ResourceNotFound(path) => assert_eq!(path, missing),
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_open_existing_file() {
    let path = std::env::temp_dir().join(format!("issuerelay_store_{}.db", std::process::id()));
    std::fs::File::create(&path).unwrap();
    let store = ReportStore::open(path.to_str().unwrap()).unwrap();
    store.insert(&row("persisted", "")).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    drop(store);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_insert_and_load_round_trip() {
    let store = ReportStore::open(":memory:").unwrap();
    let full = ReportRow {
        title: "it broke".to_string(),
        body: "details\n".to_string(),
        milestone: "v2".to_string(),
        labels: "a\nb".to_string(),
        assignees: "alice\nbob".to_string(),
        created_at: 1_700_000_123,
    };
    store.insert(&full).unwrap();
    store.insert(&row("second", "")).unwrap();

    let rows = store.load_reports().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], full);
    assert_eq!(rows[1].title, "second");
    assert_eq!(rows[1].labels, "");
}

#[test]
fn test_count_tracks_inserts() {
    let store = ReportStore::open(":memory:").unwrap();
    for i in 0..3 {
        store.insert(&row(&format!("r{i}"), "bot")).unwrap();
    }
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_schema_apply_is_idempotent() {
    let path = std::env::temp_dir().join(format!("issuerelay_reopen_{}.db", std::process::id()));
    std::fs::File::create(&path).unwrap();
    {
        let store = ReportStore::open(path.to_str().unwrap()).unwrap();
        store.insert(&row("kept", "")).unwrap();
    }
    let store = ReportStore::open(path.to_str().unwrap()).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    drop(store);
    let _ = std::fs::remove_file(&path);
}
