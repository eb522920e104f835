//! Text search: matching semantics, literal wildcards and best-effort logging.

mod common;

use common::{person, settle, wait_for_calls, Harness};
use person_directory::storage::StoreOp;
use person_directory::{DirectoryError, DirectoryStore, NewPerson, SearchType};

#[tokio::test]
async fn finds_alice_by_partial_name_only() {
    let h = Harness::new();
    h.store
        .insert_person(person("Alice", "555-1111", ""), None)
        .await
        .unwrap();

    let hits = h.service.search("ali").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Alice");

    assert!(h.service.search("999").await.unwrap().is_empty());

    let all = h.service.search("").await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn matches_any_of_the_five_columns_case_insensitively() {
    let h = Harness::new();
    let records = [
        NewPerson {
            name: "Bob Stone".into(),
            address: Some("12 Elm Street".into()),
            ..NewPerson::default()
        },
        NewPerson {
            name: "Carol".into(),
            email: Some("carol@EXAMPLE.org".into()),
            nid_number: Some("NID-778899".into()),
            ..NewPerson::default()
        },
        NewPerson {
            name: "Dan".into(),
            social_media: Some("@elm_fan".into()),
            ..NewPerson::default()
        },
    ];
    for r in records {
        h.store.insert_person(r, None).await.unwrap();
    }

    let names = |hits: Vec<person_directory::PersonRecord>| {
        hits.into_iter().map(|p| p.name).collect::<Vec<_>>()
    };

    assert_eq!(names(h.service.search("ELM").await.unwrap()), vec!["Bob Stone"]);
    assert_eq!(names(h.service.search("example.ORG").await.unwrap()), vec!["Carol"]);
    assert_eq!(names(h.service.search("7889").await.unwrap()), vec!["Carol"]);
    // Not prefix or word matching.
    assert_eq!(names(h.service.search("tone").await.unwrap()), vec!["Bob Stone"]);
    // Results come back in insertion order.
    assert_eq!(
        names(h.service.search("o").await.unwrap()),
        vec!["Bob Stone", "Carol"]
    );
}

#[tokio::test]
async fn percent_and_underscore_are_literal() {
    let h = Harness::new();
    h.store
        .insert_person(NewPerson::named("Alice"), None)
        .await
        .unwrap();
    h.store
        .insert_person(
            NewPerson {
                name: "Promo".into(),
                address: Some("Unit 50% off_road".into()),
                ..NewPerson::default()
            },
            None,
        )
        .await
        .unwrap();

    let hits = h.service.search("%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Promo");

    assert!(h.service.search("A_ice").await.unwrap().is_empty());
    assert_eq!(h.service.search("f_r").await.unwrap().len(), 1);
}

#[tokio::test]
async fn each_successful_search_logs_once_even_without_matches() {
    let h = Harness::new();

    h.service.search("nobody").await.unwrap();
    assert_eq!(wait_for_calls(&h.store, StoreOp::InsertSearchLog, 1).await, 1);
    settle().await;
    assert_eq!(h.store.calls(StoreOp::InsertSearchLog).await, 1);

    let logs = h.store.search_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].query, "nobody");
    assert_eq!(logs[0].search_type, SearchType::Text);
}

#[tokio::test]
async fn log_failures_never_reach_the_caller() {
    let h = Harness::new();
    h.store
        .insert_person(NewPerson::named("Alice"), None)
        .await
        .unwrap();
    h.store.fail_on(StoreOp::InsertSearchLog).await;

    let hits = h.service.search("alice").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(wait_for_calls(&h.store, StoreOp::InsertSearchLog, 1).await, 1);
    assert!(h.store.search_logs().await.is_empty());
}

#[tokio::test]
async fn store_failures_surface_as_query_errors_without_logging() {
    let h = Harness::new();
    h.store.fail_on(StoreOp::SearchPersons).await;

    let err = h.service.search("alice").await.unwrap_err();
    assert!(matches!(err, DirectoryError::Query(_)));

    settle().await;
    assert_eq!(h.store.calls(StoreOp::InsertSearchLog).await, 0);
    assert_eq!(h.store.calls(StoreOp::SearchPersons).await, 1);
}
