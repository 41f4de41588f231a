//! The full shopper journey: catalog → cart → checkout → dashboard.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rust_decimal::Decimal;

use namo_client::api::NewProductRequest;
use namo_client::{CartLine, CartStore, CheckoutDetails, CheckoutFlow, CheckoutState, TerminalView};
use namo_core::{OrderStatus, PaymentMethod};
use namo_integration_tests::{admin_client, spawn_app};

#[tokio::test]
async fn cod_checkout_end_to_end() {
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

    // Shopper browses the catalog and fills the cart: two lines,
    // 299 x 2 + 199 x 1 → subtotal 797, +30 shipping → 827.
    let shop = app.client();
    let products = shop.products().await.unwrap();
    assert_eq!(products.len(), 2);

    let sandalwood = products.iter().find(|p| p.name.contains("Sandalwood")).unwrap();
    let lavender = products.iter().find(|p| p.name.contains("Lavender")).unwrap();

    let mut cart = CartStore::new();
    cart.add(CartLine::from_product(sandalwood));
    cart.add(CartLine::from_product(sandalwood)); // merges, qty 2
    cart.add(CartLine::from_product(lavender));

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.subtotal(), Decimal::from(797));
    assert_eq!(cart.total(), Decimal::from(827));

    // Checkout with pay-on-delivery
    let mut flow = CheckoutFlow::new();
    let details = CheckoutDetails {
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        address: "12 Temple Road, Pune".to_owned(),
        payment_method: PaymentMethod::Cod,
    };

    let order_id = flow.submit(&shop, &cart, &details).await.unwrap();
    assert!(matches!(
        flow.state(),
        CheckoutState::Success {
            payment_method: PaymentMethod::Cod
        }
    ));

    // After the fixed confirmation delay the shell resolves the terminal
    // view; COD gets the confirmation screen and the cart empties.
    let view = flow.complete(&mut cart).unwrap();
    assert_eq!(view, TerminalView::CodConfirmation);
    assert!(cart.is_empty());

    // The dashboard sees the order exactly as submitted
    let stats = admin.stats().await.unwrap();
    assert_eq!(stats.total_orders, 1);
    let placed = stats.orders.iter().find(|o| o.id == order_id).unwrap();
    assert_eq!(placed.total_price.amount(), Decimal::from(827));
    assert_eq!(placed.payment_method, PaymentMethod::Cod);
    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.name, "Asha");
}

#[tokio::test]
async fn upi_checkout_resolves_to_scan_to_pay() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let id = admin
        .create_product(&NewProductRequest {
            name: "Rose Incense Sticks".to_owned(),
            description: None,
            price: Decimal::from(179),
            stock: 45,
            image: None,
            category: None,
        })
        .await
        .unwrap();

    let shop = app.client();
    let product = shop.product(id).await.unwrap();

    let mut cart = CartStore::new();
    cart.add(CartLine::from_product(&product));

    let mut flow = CheckoutFlow::new();
    let details = CheckoutDetails {
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        address: "4 Lake View, Indore".to_owned(),
        payment_method: PaymentMethod::Upi,
    };

    flow.submit(&shop, &cart, &details).await.unwrap();
    let view = flow.complete(&mut cart).unwrap();
    assert_eq!(view, TerminalView::ScanToPay);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn rejected_order_leaves_cart_intact_for_retry() {
    let app = spawn_app().await;
    let admin = admin_client(&app).await;

    let id = admin
        .create_product(&NewProductRequest {
            name: "Rose Incense Sticks".to_owned(),
            description: None,
            price: Decimal::from(179),
            stock: 45,
            image: None,
            category: None,
        })
        .await
        .unwrap();

    let shop = app.client();
    let product = shop.product(id).await.unwrap();

    let mut cart = CartStore::new();
    cart.add(CartLine::from_product(&product));

    // Blank address fails local validation; the dialog returns to the form
    // with an inline error and the cart is untouched.
    let mut flow = CheckoutFlow::new();
    let incomplete = CheckoutDetails {
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        address: String::new(),
        payment_method: PaymentMethod::Upi,
    };

    let result = flow.submit(&shop, &cart, &incomplete).await;
    assert!(result.is_err());
    assert!(matches!(
        flow.state(),
        CheckoutState::EnteringDetails { error: Some(_) }
    ));
    assert_eq!(cart.lines().len(), 1);

    // Retry with the address filled in succeeds from the same state.
    let complete = CheckoutDetails {
        address: "4 Lake View, Indore".to_owned(),
        ..incomplete
    };
    flow.submit(&shop, &cart, &complete).await.unwrap();
    assert!(matches!(flow.state(), CheckoutState::Success { .. }));
}
