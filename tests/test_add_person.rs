//! Add-person flow: validation, upload-then-insert ordering.

mod common;

use common::{jpeg, person, Harness};
use person_directory::storage::StoreOp;
use person_directory::{BlobStore, DirectoryError, ImageFile, NewPerson};

#[tokio::test]
async fn empty_name_is_rejected_before_any_store_or_storage_call() {
    let h = Harness::new();

    for name in ["", "   "] {
        let err = h
            .service
            .add_person(NewPerson::named(name), Some(jpeg(1024)))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }

    assert_eq!(h.store.total_calls().await, 0);
    assert!(h.blobs.keys().await.is_empty());
}

#[tokio::test]
async fn photo_is_uploaded_and_linked() {
    let h = Harness::new();

    let record = h
        .service
        .add_person(person("Alice", "555-1111", "alice@example.com"), Some(jpeg(2048)))
        .await
        .unwrap();

    let url = record.photo_url.clone().expect("photo_url set");
    let keys = h.blobs.keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with(".jpg"));
    assert!(!keys[0].starts_with("temp/"));
    assert_eq!(url, h.blobs.public_url(&keys[0]));
    assert_eq!(h.blobs.get_by_url(&url).await.unwrap().len(), 2048);

    assert_eq!(h.store.persons().await, vec![record]);
}

#[tokio::test]
async fn person_without_photo_has_no_url() {
    let h = Harness::new();
    let record = h
        .service
        .add_person(NewPerson::named("Bob"), None)
        .await
        .unwrap();
    assert_eq!(record.photo_url, None);
    assert!(h.blobs.keys().await.is_empty());
}

#[tokio::test]
async fn failed_upload_persists_nothing() {
    let h = Harness::new();
    h.blobs.set_fail_uploads(true);

    let err = h
        .service
        .add_person(NewPerson::named("Alice"), Some(jpeg(512)))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Upload(_)));
    assert_eq!(h.store.calls(StoreOp::InsertPerson).await, 0);
    assert!(h.store.persons().await.is_empty());
}

#[tokio::test]
async fn non_image_uploads_are_refused() {
    let h = Harness::new();
    let pdf = ImageFile::new("cv.pdf", Some("application/pdf"), vec![1, 2, 3]);

    let err = h
        .service
        .add_person(NewPerson::named("Alice"), Some(pdf))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Upload(_)));
    assert!(h.store.persons().await.is_empty());
}

#[tokio::test]
async fn insert_failure_after_upload_leaves_the_photo() {
    let h = Harness::new();
    h.store.fail_on(StoreOp::InsertPerson).await;

    let err = h
        .service
        .add_person(NewPerson::named("Alice"), Some(jpeg(256)))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Query(_)));
    // Not transactional: the uploaded object stays behind.
    assert_eq!(h.blobs.keys().await.len(), 1);
}

#[tokio::test]
async fn dashboard_count_follows_inserts() {
    let h = Harness::new();
    assert_eq!(h.service.dashboard().await.total_records, 0);

    h.service.add_person(NewPerson::named("A"), None).await.unwrap();
    h.service.add_person(NewPerson::named("B"), None).await.unwrap();

    assert_eq!(h.service.dashboard().await.total_records, 2);
}
