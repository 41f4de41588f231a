//! Broadcast delivery of typed change events.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use futures::StreamExt;
use rust_decimal::Decimal;

use namo_client::api::NewProductRequest;
use namo_core::{ChangeEvent, ChangeKind};
use namo_integration_tests::{admin_client, spawn_app};

fn product() -> NewProductRequest {
    NewProductRequest {
        name: "Sandalwood Agarbatti".to_owned(),
        description: None,
        price: Decimal::from(299),
        stock: 50,
        image: None,
        category: None,
    }
}

#[tokio::test]
async fn every_mutation_publishes_a_typed_event() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let mut rx = app.state.events().subscribe();

    // Create → Product/created
    let id = admin.create_product(&product()).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .unwrap();
    assert_eq!(
        event,
        ChangeEvent::Product {
            change: ChangeKind::Created,
            id
        }
    );
    assert_eq!(event.channel(), "productUpdate");

    // Stock write → Product/updated
    admin.update_stock(id, 10).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .unwrap();
    assert_eq!(
        event,
        ChangeEvent::Product {
            change: ChangeKind::Updated,
            id
        }
    );

    // Delete → Product/deleted
    admin.delete_product(id).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .unwrap();
    assert_eq!(
        event,
        ChangeEvent::Product {
            change: ChangeKind::Deleted,
            id
        }
    );
}

#[tokio::test]
async fn order_and_review_channels() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;
    let product_id = admin.create_product(&product()).await.unwrap();

    let mut rx = app.state.events().subscribe();

    let order_id = app
        .client()
        .create_order(&namo_client::api::NewOrderRequest {
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            address: "12 Temple Road, Pune".to_owned(),
            total_price: Decimal::from(329),
            payment_method: namo_core::PaymentMethod::Cod,
            items: Vec::new(),
        })
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .unwrap();
    assert_eq!(
        event,
        ChangeEvent::Order {
            change: ChangeKind::Created,
            id: order_id
        }
    );
    assert_eq!(event.channel(), "orderUpdate");

    app.client()
        .create_review(&namo_client::api::NewReviewRequest {
            name: "Asha".to_owned(),
            review: "Lovely".to_owned(),
            product_id,
            rating: 5,
        })
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .unwrap();
    assert!(matches!(
        event,
        ChangeEvent::Review {
            change: ChangeKind::Created,
            ..
        }
    ));
    assert_eq!(event.channel(), "reviewUpdate");
}

#[tokio::test]
async fn sse_stream_carries_named_events() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/events", app.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/event-stream"), "{content_type}");

    let mut stream = Box::pin(response.bytes_stream());

    // Give the subscription a moment to be registered before mutating.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let id = admin.create_product(&product()).await.unwrap();

    let mut buffer = String::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let chunk = tokio::time::timeout_at(deadline, stream.next())
            .await
            .expect("no SSE data within 5s")
            .expect("stream ended")
            .expect("stream errored");
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        if buffer.contains("event: productUpdate") {
            break;
        }
    }

    assert!(buffer.contains("\"change\":\"created\""));
    assert!(buffer.contains(&format!("\"id\":{id}")));
}
