//! Property-based tests for parsing, casting, and reconciliation invariants.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Scalar casting is total and loss-aware
//! - CSV parsing preserves row count and column values
//! - Re-import keyed on a stable field never grows the collection
//! - Export pagination returns every stored document exactly once

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tabsync::formats::{CsvImportFormat, ImportFormat};
use tabsync::models::infer_scalar;
use tabsync::{CsvTransfer, InMemoryRepository, ProcessorOptions, Repository};

proptest! {
    /// Property: every integer survives the string round trip as a number.
    #[test]
    fn prop_integers_cast_to_numbers(n in any::<i64>()) {
        let value = infer_scalar(&n.to_string());
        prop_assert_eq!(value, json!(n));
    }

    /// Property: finite floats rendered by serde cast back to numbers.
    #[test]
    fn prop_finite_floats_cast_to_numbers(f in -1e12f64..1e12f64) {
        let rendered = json!(f).to_string();
        let value = infer_scalar(&rendered);
        prop_assert!(value.is_number(), "{rendered} did not cast: {value:?}");
    }

    /// Property: strings containing an alphabetic character other than the
    /// exponent marker never become numbers.
    #[test]
    fn prop_wordlike_strings_stay_strings(s in "[a-df-zA-DF-Z][a-zA-Z0-9 ]{0,30}") {
        let value = infer_scalar(&s);
        prop_assert_eq!(value, Value::String(s));
    }

    /// Property: casting is idempotent over its own string rendering.
    #[test]
    fn prop_casting_is_stable(s in "[-+]?[0-9]{1,15}(\\.[0-9]{1,6})?") {
        let first = infer_scalar(&s);
        let rendered = match &first {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => panic!("unexpected cast result: {other:?}"),
        };
        let second = infer_scalar(&rendered);
        prop_assert_eq!(first, second);
    }

    /// Property: the parser yields one record per data row, all carrying the
    /// header's columns.
    #[test]
    fn prop_csv_parse_preserves_rows(
        rows in prop::collection::vec(("[a-zA-Z]{1,10}", "[a-zA-Z]{1,10}"), 1..20)
    ) {
        let mut payload = String::from("first,second\n");
        for (a, b) in &rows {
            payload.push_str(&format!("{a},{b}\n"));
        }

        let records = CsvImportFormat::new().parse(payload.as_bytes()).unwrap();
        prop_assert_eq!(records.len(), rows.len());
        for (record, (a, b)) in records.iter().zip(&rows) {
            prop_assert_eq!(record.get("first"), Some(&json!(a)));
            prop_assert_eq!(record.get("second"), Some(&json!(b)));
        }
    }

    /// Property: importing the same keyed payload twice never grows the
    /// collection past the number of distinct keys.
    #[test]
    fn prop_keyed_reimport_is_idempotent(
        keys in prop::collection::hash_set("[a-z]{3,8}", 1..15)
    ) {
        let repository = Arc::new(InMemoryRepository::new());
        let transfer = CsvTransfer::new(repository.clone());
        let options = ProcessorOptions::new("items").with_id_field("key");

        let mut payload = String::from("key,title\n");
        for key in &keys {
            payload.push_str(&format!("{key},t\n"));
        }

        let first = transfer.import_csv(payload.as_bytes(), &options);
        prop_assert_eq!(first.created, keys.len());

        let second = transfer.import_csv(payload.as_bytes(), &options);
        prop_assert_eq!(second.created, 0);
        prop_assert_eq!(second.updated, keys.len());
        prop_assert_eq!(repository.count("items").unwrap(), keys.len());
    }

    /// Property: export emits exactly one data row per stored document.
    #[test]
    fn prop_export_emits_every_document_once(count in 0usize..40) {
        let repository = Arc::new(InMemoryRepository::new());
        for i in 0..count {
            let mut data = tabsync::Record::new();
            data.insert("n".to_string(), json!(i));
            repository.create("items", data, None).unwrap();
        }

        let transfer = CsvTransfer::new(repository);
        let options = ProcessorOptions::new("items").with_exclude_fields([
            "documentId",
            "createdAt",
            "updatedAt",
            "publishedAt",
        ]);
        let export = transfer.export_csv(&options).unwrap();

        if count == 0 {
            prop_assert_eq!(export.payload, "");
        } else {
            let lines: Vec<&str> = export.payload.lines().collect();
            prop_assert_eq!(lines.len(), count + 1);
            let rows: std::collections::HashSet<&str> = lines[1..].iter().copied().collect();
            prop_assert_eq!(rows.len(), count);
        }
    }
}
