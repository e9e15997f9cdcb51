// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "test-util")]

//! Integration tests for `MockBackend`.

use std::collections::HashMap;
use std::time::Duration;

use cachewrap_backend::testing::{BackendOp, MockBackend};
use cachewrap_backend::{CacheBackend, CacheOptions};

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn records_operations_in_call_order() {
    block_on(async {
        let backend = MockBackend::<String, i32>::new();
        let options = CacheOptions::new();

        let _ = backend.get(&"a".to_string(), &options).await.expect("get failed");
        let _ = backend.set(&"a".to_string(), 1, &options).await.expect("set failed");
        backend.delete(&"a".to_string(), &options).await.expect("delete failed");
        backend.flush(&options).await.expect("flush failed");

        assert_eq!(
            backend.operations(),
            vec![
                BackendOp::Get("a".to_string()),
                BackendOp::Set {
                    key: "a".to_string(),
                    value: 1
                },
                BackendOp::Delete("a".to_string()),
                BackendOp::Flush,
            ]
        );
    });
}

#[test]
fn records_options_for_each_call() {
    block_on(async {
        let backend = MockBackend::<String, i32>::new();
        let options = CacheOptions::new().with_ttl(Duration::from_secs(9)).with_param("ns", "users");

        let _ = backend.set(&"a".to_string(), 1, &options).await.expect("set failed");
        backend.flush(&options).await.expect("flush failed");

        assert_eq!(backend.options_seen(), vec![options.clone(), options]);
    });
}

#[test]
fn failed_operation_is_recorded_and_leaves_data_untouched() {
    block_on(async {
        let backend = MockBackend::with_data(HashMap::from([("a".to_string(), 1)]));
        backend.fail_when(|op| matches!(op, BackendOp::Delete(_)));

        let result = backend.delete(&"a".to_string(), &CacheOptions::new()).await;

        assert!(result.is_err());
        assert!(backend.contains_key(&"a".to_string()));
        assert_eq!(backend.operations(), vec![BackendOp::Delete("a".to_string())]);
    });
}

#[test]
fn clear_failures_restores_success() {
    block_on(async {
        let backend = MockBackend::<String, i32>::new();
        backend.fail_when(|_| true);
        assert!(backend.flush(&CacheOptions::new()).await.is_err());

        backend.clear_failures();
        backend.clear_operations();

        assert!(backend.flush(&CacheOptions::new()).await.is_ok());
        assert_eq!(backend.operations(), vec![BackendOp::Flush]);
    });
}

#[test]
fn peek_does_not_record() {
    let backend = MockBackend::with_data(HashMap::from([("a".to_string(), 5)]));

    assert_eq!(backend.peek(&"a".to_string()), Some(5));
    assert_eq!(backend.entry_count(), 1);
    assert!(backend.operations().is_empty());
}
