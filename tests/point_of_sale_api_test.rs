mod common;

use axum::http::Method;
use pos_api::entities::sale::{Entity as SaleEntity, SaleStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use serde_json::json;

use common::{decimal, response_json, TestApp};

#[tokio::test]
async fn add_to_cart_charges_placeholder_price() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/Point_Of_Sale/add-to-cart?productId=anyId&quantity=3",
            None,
        )
        .await;

    assert_eq!(response.status(), 200);
    let sale = response_json(response).await;
    assert_eq!(decimal(&sale["total_amount"]), dec!(30.00));
    assert_eq!(sale["status"], "PENDING");
    assert!(uuid::Uuid::parse_str(sale["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn add_to_cart_validates_quantity() {
    let app = TestApp::new().await;

    let zero = app
        .request(
            Method::POST,
            "/Point_Of_Sale/add-to-cart?productId=1&quantity=0",
            None,
        )
        .await;
    assert_eq!(zero.status(), 400);

    let missing = app
        .request(Method::POST, "/Point_Of_Sale/add-to-cart?productId=1", None)
        .await;
    assert_eq!(missing.status(), 400);
    assert_eq!(response_json(missing).await["error"], "Bad Request");
}

#[tokio::test]
async fn checkout_without_amount_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/Point_Of_Sale/checkout",
            Some(json!({ "method": "CASH" })),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("amount_paid"));
}

#[tokio::test]
async fn catalog_pricing_handles_largest_cart() {
    let app = TestApp::with_config(|cfg| cfg.cart_pricing = "catalog".into()).await;

    let rejected = app
        .request(
            Method::POST,
            "/products/add",
            Some(json!({ "name": "Gold", "price": "99999999999999999999" })),
        )
        .await;
    assert_eq!(rejected.status(), 400);

    let created = response_json(
        app.request(
            Method::POST,
            "/products/add",
            Some(json!({ "name": "Gold", "price": "99999999.99" })),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let stored = response_json(
        app.request(Method::GET, &format!("/products/{}", id), None)
            .await,
    )
    .await;

    let response = app
        .request(
            Method::POST,
            &format!("/Point_Of_Sale/add-to-cart?productId={}&quantity={}", id, i32::MAX),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        decimal(&response_json(response).await["total_amount"]),
        decimal(&stored["price"]) * Decimal::from(i32::MAX)
    );
}

#[tokio::test]
async fn checkout_completes_any_payment() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/Point_Of_Sale/checkout",
            Some(json!({ "method": "CASH", "amountPaid": "0.01" })),
        )
        .await;

    assert_eq!(response.status(), 200);
    let sale = response_json(response).await;
    assert_eq!(sale["status"], "COMPLETED");
    assert_eq!(decimal(&sale["total_amount"]), dec!(0));
}

#[tokio::test]
async fn catalog_pricing_uses_stored_price() {
    let app = TestApp::with_config(|cfg| cfg.cart_pricing = "catalog".into()).await;

    let created = response_json(
        app.request(
            Method::POST,
            "/products/add",
            Some(json!({ "name": "Notebook", "price": "4.25" })),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            &format!("/Point_Of_Sale/add-to-cart?productId={}&quantity=2", id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(decimal(&response_json(response).await["total_amount"]), dec!(8.50));

    let unknown = app
        .request(
            Method::POST,
            "/Point_Of_Sale/add-to-cart?productId=anyId&quantity=1",
            None,
        )
        .await;
    assert_eq!(unknown.status(), 404);
}

#[tokio::test]
async fn sale_journal_records_cart_and_checkout() {
    let app = TestApp::with_config(|cfg| cfg.record_sales = true).await;

    app.request(
        Method::POST,
        "/Point_Of_Sale/add-to-cart?productId=7&quantity=1",
        None,
    )
    .await;
    app.request(
        Method::POST,
        "/Point_Of_Sale/checkout",
        Some(json!({ "method": "CARD", "amount_paid": "10.00" })),
    )
    .await;

    let rows = SaleEntity::find().all(app.state.db.as_ref()).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.status == SaleStatus::Pending));
    assert!(rows
        .iter()
        .any(|r| r.status == SaleStatus::Completed && r.payment_method.as_deref() == Some("CARD")));
}

#[tokio::test]
async fn health_and_status_report_service_state() {
    let app = TestApp::new().await;

    let health = app.request(Method::GET, "/health", None).await;
    assert_eq!(health.status(), 200);
    let health = response_json(health).await;
    assert_eq!(health["status"], "up");
    assert_eq!(health["database"], "up");

    let status = response_json(app.request(Method::GET, "/status", None).await).await;
    assert_eq!(status["name"], "pos-api");
    assert_eq!(status["cart_pricing"], "placeholder");
    assert_eq!(status["record_sales"], false);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None)
        .await;

    assert_eq!(response.status(), 200);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/Point_Of_Sale/add-to-cart"].is_object());
}
