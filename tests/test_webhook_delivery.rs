mod helpers;

use helpers::*;

use bookdrop::api::ApiError;
use bookdrop::models::{EmailTemplate, Product, SendStatus, WebhookPayload};
use bookdrop::services::{DeliveryService, WebhookOutcome};
use bookdrop::store::Store;
use std::sync::Arc;

fn payload(event: &str, order: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(serde_json::json!({
        "event": event,
        "data": {"order": order}
    }))
    .unwrap()
}

fn order_with_items(items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "customer": {"name": "Ana", "email": "ana@example.com"},
        "items": items,
        "number": 1042,
        "total": 19.9,
        "created_at": "2024-03-05T12:30:00Z"
    })
}

#[tokio::test]
async fn test_irrelevant_event_is_ignored_without_side_effects() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();

    let outcome = service
        .handle_event(payload(
            "order.created",
            order_with_items(serde_json::json!([{"name": "Rust Book"}])),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, WebhookOutcome::Ignored);
    assert!(store.list_history(100).await.unwrap().is_empty());
    assert!(mailer.sent_messages().is_empty());

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_missing_order_is_a_client_error() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    let payload: WebhookPayload =
        serde_json::from_value(serde_json::json!({"event": "order.paid", "data": {}})).unwrap();
    let err = service.handle_event(payload).await.unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_missing_customer_email_is_a_client_error() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();

    let err = service
        .handle_event(payload(
            "order.paid",
            serde_json::json!({
                "customer": {"name": "Ana"},
                "items": [{"name": "Rust Book"}]
            }),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert!(store.list_history(100).await.unwrap().is_empty());
    assert!(mailer.sent_messages().is_empty());

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_missing_settings_block_the_whole_batch() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    let err = service
        .handle_event(payload(
            "order.paid",
            order_with_items(serde_json::json!([{"name": "Rust Book"}])),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Precondition(_)));
    assert!(store.list_history(100).await.unwrap().is_empty());
    assert!(mailer.sent_messages().is_empty());

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_delivers_one_email_per_item_with_catalog_matching() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();
    let rust = Product::new(
        "Rust in Action".to_string(),
        "https://drive.example.com/rust".to_string(),
        None,
        Some("77".to_string()),
    );
    let go = Product::new(
        "Go Basics".to_string(),
        "https://drive.example.com/go".to_string(),
        None,
        None,
    );
    store.insert_product(&rust).await.unwrap();
    store.insert_product(&go).await.unwrap();

    // first item matches by platform id despite the stale name,
    // second by exact name
    let outcome = service
        .handle_event(payload(
            "order.approved",
            order_with_items(serde_json::json!([
                {"id": 77, "name": "Old Listing Name"},
                {"name": "Go Basics"}
            ])),
        ))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        WebhookOutcome::Processed {
            attempted: 2,
            failed: 0
        }
    );

    let sent = mailer.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.to == "ana@example.com"));
    assert!(sent[0].body.contains("Rust in Action"));
    assert!(sent[0].body.contains("https://drive.example.com/rust"));
    assert!(sent[1].body.contains("Go Basics"));

    // newest first: the second item's entry displays before the first's
    let history = store.list_history(100).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].product_name, "Go Basics");
    assert_eq!(history[1].product_name, "Rust in Action");
    assert!(history.iter().all(|e| e.status == SendStatus::Success));
    assert!(history.iter().all(|e| e.order_number == "1042"));

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_one_failed_send_does_not_abort_the_batch() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(FailOnMailer::new("Broken Book"));
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();

    let outcome = service
        .handle_event(payload(
            "order.paid",
            order_with_items(serde_json::json!([
                {"name": "First Book"},
                {"name": "Broken Book"},
                {"name": "Third Book"}
            ])),
        ))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        WebhookOutcome::Processed {
            attempted: 3,
            failed: 1
        }
    );

    // every item produced exactly one entry, in payload order
    let history = store.list_history(100).await.unwrap();
    let names: Vec<&str> = history.iter().map(|e| e.product_name.as_str()).collect();
    assert_eq!(names, ["Third Book", "Broken Book", "First Book"]);

    for entry in &history {
        if entry.product_name == "Broken Book" {
            assert_eq!(entry.status, SendStatus::Error);
            assert!(!entry.error_message.as_deref().unwrap().is_empty());
        } else {
            assert_eq!(entry.status, SendStatus::Success);
            assert!(entry.error_message.is_none());
        }
    }

    // the two working sends still went out
    assert_eq!(mailer.sent_messages().len(), 2);

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_unmatched_item_falls_back_to_its_own_name() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();

    service
        .handle_event(payload(
            "order.paid",
            order_with_items(serde_json::json!([{"id": 99, "name": "Mystery Novel"}])),
        ))
        .await
        .unwrap();

    let history = store.list_history(100).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_name, "Mystery Novel");
    assert!(history[0].product_link.is_none());

    teardown_json_store(&path).await;
}

#[tokio::test]
async fn test_saved_template_renders_totals_and_dates() {
    let (store, path) = setup_json_store();
    let store: Arc<dyn Store> = Arc::new(store);
    let mailer = Arc::new(RecordingMailer::new());
    let service = DeliveryService::new(store.clone(), mailer.clone());

    store.save_settings(&test_settings()).await.unwrap();
    store
        .save_template(&EmailTemplate {
            subject: "Order {{order_number}}".to_string(),
            body: "Paid {{total}} on {{order_date}} by {{customer_email}}".to_string(),
        })
        .await
        .unwrap();

    service
        .handle_event(payload(
            "order.paid",
            order_with_items(serde_json::json!([{"name": "Rust Book"}])),
        ))
        .await
        .unwrap();

    let sent = mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Order 1042");
    assert_eq!(sent[0].body, "Paid 19.90 on 05/03/2024 by ana@example.com");

    teardown_json_store(&path).await;
}
