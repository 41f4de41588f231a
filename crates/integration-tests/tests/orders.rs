//! Order placement, status updates, and the stats aggregate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use namo_client::api::{NewOrderRequest, NewProductRequest, OrderItem};
use namo_core::{OrderId, OrderStatus, PaymentMethod};
use namo_integration_tests::{admin_client, spawn_app, spawn_app_with_policy};
use namo_server::config::StockPolicy;

fn order(total: i64) -> NewOrderRequest {
    NewOrderRequest {
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        address: "12 Temple Road, Pune".to_owned(),
        total_price: Decimal::from(total),
        payment_method: PaymentMethod::Cod,
        items: Vec::new(),
    }
}

#[tokio::test]
async fn order_creation_validates_fields() {
    let app = spawn_app().await;
    let http = reqwest::Client::new();

    let valid = json!({
        "name": "Asha",
        "email": "asha@example.com",
        "address": "12 Temple Road, Pune",
        "total_price": "827",
        "payment_method": "COD",
    });

    let response = http
        .post(format!("{}/api/orders", app.base_url))
        .json(&valid)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Each required field missing or blank → 400
    for field in ["name", "email", "address", "total_price", "payment_method"] {
        let mut body = valid.clone();
        body.as_object_mut().unwrap().remove(field);
        let response = http
            .post(format!("{}/api/orders", app.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");
    }

    let mut blank_name = valid.clone();
    blank_name["name"] = json!("   ");
    let response = http
        .post(format!("{}/api/orders", app.base_url))
        .json(&blank_name)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown payment method → 400
    let mut card = valid.clone();
    card["payment_method"] = json!("CARD");
    let response = http
        .post(format!("{}/api/orders", app.base_url))
        .json(&card)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_updates_accept_only_dispatched_and_delivered() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let id = app.client().create_order(&order(299)).await.unwrap();

    admin
        .update_order_status(id, OrderStatus::Dispatched)
        .await
        .unwrap();

    // "Pending" is never a valid update value
    let login = app
        .client()
        .login(
            namo_integration_tests::ADMIN_EMAIL,
            namo_integration_tests::ADMIN_PASSWORD,
        )
        .await
        .unwrap();
    let response = reqwest::Client::new()
        .put(format!("{}/api/orders/{id}/status", app.base_url))
        .bearer_auth(&login.token)
        .json(&json!({"status": "Pending"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Neither is anything outside the enumeration
    let response = reqwest::Client::new()
        .put(format!("{}/api/orders/{id}/status", app.base_url))
        .bearer_auth(&login.token)
        .json(&json!({"status": "Shipped"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown order → 404
    let err = admin
        .update_order_status(OrderId::new(9_999), OrderStatus::Dispatched)
        .await
        .unwrap_err();
    assert!(matches!(err, namo_client::ApiError::Api { status: 404, .. }));

    // No credentials → 401
    let response = reqwest::Client::new()
        .put(format!("{}/api/orders/{id}/status", app.base_url))
        .json(&json!({"status": "Dispatched"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn store_applies_status_writes_without_sequence_guard() {
    // The forward-only sequence is a dashboard rule; the store itself
    // performs any Dispatched/Delivered write regardless of prior status.
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let id = app.client().create_order(&order(299)).await.unwrap();

    // Pending → Delivered directly, skipping Dispatched
    admin
        .update_order_status(id, OrderStatus::Delivered)
        .await
        .unwrap();

    let stats = admin.stats().await.unwrap();
    let placed = stats.orders.iter().find(|o| o.id == id).unwrap();
    assert_eq!(placed.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn stats_aggregates_orders_and_stock() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    admin
        .create_product(&NewProductRequest {
            name: "Sandalwood Agarbatti".to_owned(),
            description: None,
            price: Decimal::from(299),
            stock: 50,
            image: None,
            category: None,
        })
        .await
        .unwrap();
    admin
        .create_product(&NewProductRequest {
            name: "Lavender Dhoop Cones".to_owned(),
            description: None,
            price: Decimal::from(199),
            stock: 60,
            image: None,
            category: None,
        })
        .await
        .unwrap();

    app.client().create_order(&order(827)).await.unwrap();
    app.client().create_order(&order(300)).await.unwrap();

    let stats = admin.stats().await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_sales, Decimal::from(1_127));
    assert_eq!(stats.stock, 110);
    assert_eq!(stats.orders.len(), 2);
    assert!(stats.orders.iter().all(|o| o.status == OrderStatus::Pending));

    // Stats are admin-only
    let err = app.client().stats().await.unwrap_err();
    assert!(matches!(err, namo_client::ApiError::Api { status: 401, .. }));
}

#[tokio::test]
async fn manual_policy_never_touches_stock() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let id = admin
        .create_product(&NewProductRequest {
            name: "Nag Champa Sticks".to_owned(),
            description: None,
            price: Decimal::from(149),
            stock: 5,
            image: None,
            category: None,
        })
        .await
        .unwrap();

    let mut request = order(149);
    request.items = vec![OrderItem {
        product_id: id,
        quantity: 3,
    }];
    app.client().create_order(&request).await.unwrap();

    // Default policy: the submitted cart is accepted but stock is untouched
    assert_eq!(app.client().product(id).await.unwrap().stock, 5);
}

#[tokio::test]
async fn automatic_policy_decrements_stock_transactionally() {
    let app = spawn_app_with_policy(StockPolicy::Automatic).await;
    let admin = admin_client(&app).await;

    let id = admin
        .create_product(&NewProductRequest {
            name: "Nag Champa Sticks".to_owned(),
            description: None,
            price: Decimal::from(149),
            stock: 5,
            image: None,
            category: None,
        })
        .await
        .unwrap();

    let mut request = order(298);
    request.items = vec![OrderItem {
        product_id: id,
        quantity: 2,
    }];
    app.client().create_order(&request).await.unwrap();
    assert_eq!(app.client().product(id).await.unwrap().stock, 3);

    // Exceeding stock rejects the whole order and rolls back
    let mut request = order(1_490);
    request.items = vec![OrderItem {
        product_id: id,
        quantity: 10,
    }];
    let err = app.client().create_order(&request).await.unwrap_err();
    assert!(matches!(err, namo_client::ApiError::Api { status: 409, .. }));

    assert_eq!(app.client().product(id).await.unwrap().stock, 3);
    let stats = admin.stats().await.unwrap();
    assert_eq!(stats.total_orders, 1);

    // A line for a product that doesn't exist → 404
    let mut request = order(149);
    request.items = vec![OrderItem {
        product_id: namo_core::ProductId::new(9_999),
        quantity: 1,
    }];
    let err = app.client().create_order(&request).await.unwrap_err();
    assert!(matches!(err, namo_client::ApiError::Api { status: 404, .. }));
}
