//! Account listing and health endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;

use namo_integration_tests::{admin_client, spawn_app};

#[tokio::test]
async fn admin_lists_accounts_without_credentials_leaking() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    app.client()
        .register("asha", "asha@example.com", "incense-lover-9")
        .await
        .unwrap();

    let users = admin.users().await.unwrap();
    assert_eq!(users.len(), 2); // the admin plus the customer
    let asha = users
        .iter()
        .find(|u| u.email.as_str() == "asha@example.com")
        .unwrap();
    assert!(!asha.is_admin());

    // The wire payload carries no password material at all
    let login = app
        .client()
        .login(
            namo_integration_tests::ADMIN_EMAIL,
            namo_integration_tests::ADMIN_PASSWORD,
        )
        .await
        .unwrap();
    let raw = reqwest::Client::new()
        .get(format!("{}/api/users", app.base_url))
        .bearer_auth(&login.token)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("argon2"));

    // Listing is admin-only
    let response = reqwest::Client::new()
        .get(format!("{}/api/users", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoints() {
    let app = spawn_app().await;
    let http = reqwest::Client::new();

    let response = http
        .get(format!("{}/health", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");

    let response = http
        .get(format!("{}/health/ready", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
