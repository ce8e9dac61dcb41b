//! Integration tests for the customer persistence service.

mod common;

use clementine_core::CustomerId;
use clementine_store::db::StoreError;
use clementine_store::services::CustomerService;

use common::{address, count_rows, credit_card, customer, date, test_pool};

#[tokio::test]
async fn create_then_retrieve_round_trips_every_field() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let created = service
        .create(customer("avery@example.com", "91101", date(1985, 3, 14)))
        .await
        .expect("create should succeed");
    let id = created.id.expect("created customer should carry an id");

    let retrieved = service.retrieve(id).await.expect("retrieve should succeed");
    assert_eq!(retrieved, Some(created));
}

#[tokio::test]
async fn create_rejects_a_preset_id_without_touching_storage() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let mut subject = customer("avery@example.com", "91101", date(1985, 3, 14));
    subject.id = Some(CustomerId::new(7));

    let result = service.create(subject).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    assert_eq!(count_rows(&pool, "customer").await, 0);
}

#[tokio::test]
async fn create_without_an_address_leaves_no_rows_behind() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let mut subject = customer("avery@example.com", "91101", date(1985, 3, 14));
    subject.address = None;

    let result = service.create(subject).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    assert_eq!(count_rows(&pool, "customer").await, 0);
    assert_eq!(count_rows(&pool, "creditcard").await, 0);
}

#[tokio::test]
async fn create_without_a_credit_card_rolls_back_earlier_inserts() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let mut subject = customer("avery@example.com", "91101", date(1985, 3, 14));
    subject.credit_card = None;

    // The customer and address inserts run before the missing credit card
    // is noticed; the rollback must erase both.
    let result = service.create(subject).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    assert_eq!(count_rows(&pool, "customer").await, 0);
    assert_eq!(count_rows(&pool, "address").await, 0);
}

#[tokio::test]
async fn retrieving_an_unknown_id_is_absent_not_an_error() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let retrieved = service
        .retrieve(CustomerId::new(9999))
        .await
        .expect("retrieve should succeed");
    assert_eq!(retrieved, None);
}

#[tokio::test]
async fn update_replaces_dependents_instead_of_accumulating_them() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let mut subject = service
        .create(customer("avery@example.com", "91101", date(1985, 3, 14)))
        .await
        .expect("create should succeed");
    let id = subject.id.expect("created customer should carry an id");

    subject.address = Some(address("02139"));
    subject.credit_card = Some(credit_card("5500005555555559"));
    assert_eq!(service.update(subject.clone()).await.expect("first update"), 1);

    subject.address = Some(address("60614"));
    assert_eq!(service.update(subject.clone()).await.expect("second update"), 1);

    // Two updates later there is still exactly one row of each dependent,
    // holding only the latest values.
    assert_eq!(count_rows(&pool, "address").await, 1);
    assert_eq!(count_rows(&pool, "creditcard").await, 1);

    let retrieved = service
        .retrieve(id)
        .await
        .expect("retrieve should succeed")
        .expect("customer should still exist");
    assert_eq!(retrieved.address, Some(address("60614")));
    assert_eq!(
        retrieved.credit_card,
        Some(credit_card("5500005555555559"))
    );

    let stale = service
        .retrieve_by_zip_code("91101")
        .await
        .expect("zip lookup should succeed");
    assert!(stale.is_empty());
}

#[tokio::test]
async fn update_requires_an_assigned_id() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let result = service
        .update(customer("avery@example.com", "91101", date(1985, 3, 14)))
        .await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
}

#[tokio::test]
async fn update_requires_both_dependent_payloads() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let created = service
        .create(customer("avery@example.com", "91101", date(1985, 3, 14)))
        .await
        .expect("create should succeed");
    let id = created.id.expect("created customer should carry an id");

    let mut missing_card = created.clone();
    missing_card.credit_card = None;
    let result = service.update(missing_card).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));

    // The rejected update must not have disturbed the stored state.
    let retrieved = service.retrieve(id).await.expect("retrieve should succeed");
    assert_eq!(retrieved, Some(created));
}

#[tokio::test]
async fn delete_removes_only_the_customer_row() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let created = service
        .create(customer("avery@example.com", "91101", date(1985, 3, 14)))
        .await
        .expect("create should succeed");
    let id = created.id.expect("created customer should carry an id");

    assert_eq!(service.delete(id).await.expect("delete should succeed"), 1);
    assert_eq!(
        service.retrieve(id).await.expect("retrieve should succeed"),
        None
    );

    // Dependents are left in place; a second delete affects nothing.
    assert_eq!(count_rows(&pool, "address").await, 1);
    assert_eq!(count_rows(&pool, "creditcard").await, 1);
    assert_eq!(service.delete(id).await.expect("delete should succeed"), 0);
}

#[tokio::test]
async fn zip_lookup_returns_matches_in_insertion_order_with_dependents() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    for email in ["first@example.com", "second@example.com"] {
        service
            .create(customer(email, "91101", date(1985, 3, 14)))
            .await
            .expect("create should succeed");
    }
    service
        .create(customer("elsewhere@example.com", "02139", date(1985, 3, 14)))
        .await
        .expect("create should succeed");

    let matches = service
        .retrieve_by_zip_code("91101")
        .await
        .expect("zip lookup should succeed");

    let emails: Vec<&str> = matches.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, ["first@example.com", "second@example.com"]);
    for found in &matches {
        assert!(found.address.is_some());
        assert!(found.credit_card.is_some());
    }
}

#[tokio::test]
async fn zip_lookup_rejects_an_empty_zip() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let result = service.retrieve_by_zip_code("").await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
}

#[tokio::test]
async fn dob_lookup_filters_by_range() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    for (email, dob) in [
        ("early@example.com", date(1980, 1, 1)),
        ("middle@example.com", date(1990, 6, 15)),
        ("late@example.com", date(2000, 12, 31)),
    ] {
        service
            .create(customer(email, "91101", dob))
            .await
            .expect("create should succeed");
    }

    let matches = service
        .retrieve_by_date_of_birth(date(1985, 1, 1), date(1995, 1, 1))
        .await
        .expect("dob lookup should succeed");

    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches.first().map(|c| c.email.as_str()),
        Some("middle@example.com")
    );
}

#[tokio::test]
async fn dob_lookup_rejects_an_inverted_range() {
    let pool = test_pool().await;
    let service = CustomerService::new(&pool);

    let result = service
        .retrieve_by_date_of_birth(date(1995, 1, 1), date(1985, 1, 1))
        .await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
}
