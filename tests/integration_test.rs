//! End-to-end integration tests over the public API.
//!
//! Exercises the full path a boundary layer would take: raw bytes through a
//! format strategy, the reconciliation loop, the repository, and back out
//! through export.

// Integration tests use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::json;
use std::sync::Arc;
use tabsync::{
    CsvTransfer, Exporter, FindParams, FormatRegistry, Importer, InMemoryRepository,
    JsonFileRepository, ProcessorOptions, Repository,
};

fn csv_options(collection: &str) -> ProcessorOptions {
    ProcessorOptions::new(collection)
}

#[test]
fn test_import_then_export_round_trip() {
    let repository = Arc::new(InMemoryRepository::new());
    let transfer = CsvTransfer::new(repository);
    let options = csv_options("articles").with_exclude_fields([
        "documentId",
        "createdAt",
        "updatedAt",
        "publishedAt",
    ]);

    let report = transfer.import_csv(b"title,slug,views\nHello,hello,10\nWorld,world,20", &options);
    assert_eq!(report.created, 2);
    assert!(report.is_success());

    let export = transfer.export_csv(&options).unwrap();
    assert_eq!(export.mime_type, "text/csv");

    let lines: Vec<&str> = export.payload.lines().collect();
    assert_eq!(lines[0], "title,slug,views");
    assert_eq!(lines[1], "Hello,hello,10");
    assert_eq!(lines[2], "World,world,20");
}

#[test]
fn test_reimport_of_export_is_idempotent() {
    let repository = Arc::new(InMemoryRepository::new());
    let transfer = CsvTransfer::new(repository.clone());
    let import_options = csv_options("articles").with_id_field("slug");
    let export_options = csv_options("articles").with_exclude_fields([
        "documentId",
        "createdAt",
        "updatedAt",
        "publishedAt",
    ]);

    transfer.import_csv(b"title,slug\nHello,hello\nWorld,world", &import_options);
    let export = transfer.export_csv(&export_options).unwrap();

    // Feeding the export back in matches every row by its upsert key.
    let report = transfer.import_csv(export.payload.as_bytes(), &import_options);
    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 2);
    assert_eq!(repository.count("articles").unwrap(), 2);
}

#[test]
fn test_registry_drives_mixed_format_pipeline() {
    let repository: Arc<dyn Repository> = Arc::new(InMemoryRepository::new());
    let registry = FormatRegistry::with_defaults();
    let options = csv_options("articles").with_exclude_fields([
        "documentId",
        "createdAt",
        "updatedAt",
        "publishedAt",
    ]);

    // Import CSV, export JSON through registry-resolved strategies.
    let import_format = registry.resolve_import("text/csv").unwrap();
    let importer = Importer::new(repository.clone());
    let report = importer.import(b"title,n\nA,1\nB,2", import_format.as_ref(), &options);
    assert_eq!(report.created, 2);

    let export_format = registry.resolve_export(".json").unwrap();
    let exporter = Exporter::new(repository);
    let result = exporter.export(export_format.as_ref(), &options).unwrap();
    assert_eq!(result.mime_type, "application/json");

    let parsed: serde_json::Value = serde_json::from_str(&result.payload).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["title"], json!("A"));
    assert_eq!(parsed[0]["n"], json!(1));
}

#[test]
fn test_lexical_failure_commits_nothing_but_later_batch_succeeds() {
    let repository = Arc::new(InMemoryRepository::new());
    let transfer = CsvTransfer::new(repository.clone());
    let options = csv_options("articles");

    let report = transfer.import_csv(b"title\n\"broken", &options);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors[0].row, -1);
    assert_eq!(repository.count("articles").unwrap(), 0);

    let report = transfer.import_csv(b"title\nA\nB", &options);
    assert!(report.is_success());
    assert_eq!(repository.count("articles").unwrap(), 2);
}

#[test]
fn test_file_backed_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let options = csv_options("articles").with_id_field("slug");

    {
        let repository = Arc::new(JsonFileRepository::open(&path).unwrap());
        let transfer = CsvTransfer::new(repository);
        let report = transfer.import_csv(b"title,slug\nHello,hello", &options);
        assert_eq!(report.created, 1);
    }

    // A fresh process sees the same data and updates instead of duplicating.
    let repository = Arc::new(JsonFileRepository::open(&path).unwrap());
    let transfer = CsvTransfer::new(repository.clone());
    let report = transfer.import_csv(b"title,slug\nHello again,hello", &options);
    assert_eq!(report.updated, 1);
    assert_eq!(report.created, 0);

    let stored = repository
        .find_first(
            "articles",
            &FindParams::new().with_filter("slug", json!("hello")),
        )
        .unwrap()
        .unwrap();
    assert_eq!(stored.field("title"), Some(&json!("Hello again")));
}

#[test]
fn test_locale_round_trip_is_isolated() {
    let repository = Arc::new(InMemoryRepository::new());
    let transfer = CsvTransfer::new(repository);

    let en = csv_options("articles")
        .with_locale("en")
        .with_id_field("slug");
    let fr = csv_options("articles")
        .with_locale("fr")
        .with_id_field("slug");

    transfer.import_csv(b"title,slug\nHello,greeting", &en);
    transfer.import_csv(b"title,slug\nBonjour,greeting", &fr);

    let export_en = transfer
        .export_csv(&csv_options("articles").with_locale("en"))
        .unwrap();
    assert!(export_en.payload.contains("Hello"));
    assert!(!export_en.payload.contains("Bonjour"));

    // Same upsert key in another locale created a sibling, not an update.
    let report = transfer.import_csv(b"title,slug\nHello encore,greeting", &fr);
    assert_eq!(report.updated, 1);
}

#[test]
fn test_export_file_name_shape() {
    let repository = Arc::new(InMemoryRepository::new());
    let transfer = CsvTransfer::new(repository);

    let export = transfer.export_csv(&csv_options("blog posts/2024")).unwrap();

    assert!(export.file_name.starts_with("blog_posts_2024_"));
    assert!(export.file_name.ends_with(".csv"));
    assert!(!export.file_name.contains(':'));
    assert!(!export.file_name.contains('/'));
}
