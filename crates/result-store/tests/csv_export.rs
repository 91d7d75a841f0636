use journey_result_store::{
    write_csv, write_csv_file, InMemoryResultStore, ResultStore, StoreError, StoreRow, StoreSchema,
};
use serde_json::json;

fn lighthouse_store() -> InMemoryResultStore {
    let store = InMemoryResultStore::new();
    store
        .install_store(
            "lighthouse",
            StoreSchema::new()
                .column("url", "Url")
                .column("context", "Context")
                .column("performance", "Performance")
                .column("best-practices", "Best Practices"),
        )
        .unwrap();
    store
}

fn row(context: &str, performance: Option<f64>) -> StoreRow {
    let mut row = StoreRow::new();
    row.insert("url".into(), json!("https://example.com/"));
    row.insert("context".into(), json!(context));
    if let Some(score) = performance {
        row.insert("performance".into(), json!(score));
    }
    row
}

#[test]
fn csv_has_labels_header_and_one_line_per_row() {
    let store = lighthouse_store();
    store.add("lighthouse", row("desktop", Some(0.9))).unwrap();
    store.add("lighthouse", row("mobile", None)).unwrap();

    let mut out = Vec::new();
    let written = write_csv(&store, "lighthouse", &mut out).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Url,Context,Performance,Best Practices");
    assert_eq!(lines[1], "https://example.com/,desktop,0.9,");
    assert_eq!(lines[2], "https://example.com/,mobile,,");
}

#[test]
fn csv_for_unknown_store_fails() {
    let store = InMemoryResultStore::new();
    let err = write_csv(&store, "missing", Vec::<u8>::new()).unwrap_err();
    assert!(matches!(err, StoreError::UnknownStore(_)));
}

#[test]
fn csv_file_export_writes_to_disk() {
    let store = lighthouse_store();
    store.add("lighthouse", row("desktop", Some(1.0))).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lighthouse.csv");
    assert_eq!(write_csv_file(&store, "lighthouse", &path).unwrap(), 1);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Url,Context"));
    assert!(text.contains("desktop,1.0"));
}
