//! Review creation and listing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use namo_client::api::{NewProductRequest, NewReviewRequest};
use namo_core::ProductId;
use namo_integration_tests::{admin_client, spawn_app};

async fn seeded_product(app: &namo_integration_tests::TestApp) -> ProductId {
    let admin = admin_client(app).await;
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
        .unwrap()
}

#[tokio::test]
async fn review_roundtrip() {
    let app = spawn_app().await;
    let product_id = seeded_product(&app).await;

    app.client()
        .create_review(&NewReviewRequest {
            name: "Asha".to_owned(),
            review: "Burns evenly, lovely scent.".to_owned(),
            product_id,
            rating: 5,
        })
        .await
        .unwrap();

    let reviews = app.client().reviews().await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].product_id, product_id);
    assert_eq!(reviews[0].rating.stars(), 5);
    assert_eq!(reviews[0].review, "Burns evenly, lovely scent.");
}

#[tokio::test]
async fn review_for_unknown_product_is_rejected() {
    let app = spawn_app().await;

    let err = app
        .client()
        .create_review(&NewReviewRequest {
            name: "Asha".to_owned(),
            review: "ghost product".to_owned(),
            product_id: ProductId::new(9_999),
            rating: 4,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, namo_client::ApiError::Api { status: 404, .. }));

    assert!(app.client().reviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn review_validation() {
    let app = spawn_app().await;
    let product_id = seeded_product(&app).await;
    let http = reqwest::Client::new();

    let valid = json!({
        "name": "Asha",
        "review": "Lovely",
        "productId": product_id,
        "rating": 4,
    });

    // Ratings outside 1..=5 → 400
    for rating in [0, 6, -1] {
        let mut body = valid.clone();
        body["rating"] = json!(rating);
        let response = http
            .post(format!("{}/api/reviews", app.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating {rating}");
    }

    // Each required field missing → 400
    for field in ["name", "review", "productId", "rating"] {
        let mut body = valid.clone();
        body.as_object_mut().unwrap().remove(field);
        let response = http
            .post(format!("{}/api/reviews", app.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");
    }
}
