//! Checkout and order-retrieval tests.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use oxcart_core::UserId;
use oxcart_integration_tests::{Identity, TestApp, bare_request, json_request};
use oxcart_store::services::products;

async fn create_cart(app: &TestApp) -> String {
    let (status, body) = app.request(bare_request("POST", "/carts", None)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("cart id").to_owned()
}

async fn add_to_cart(app: &TestApp, cart_id: &str, product_id: Value, quantity: u32) {
    let (status, _) = app
        .request(json_request(
            "POST",
            &format!("/carts/{cart_id}/items"),
            &json!({ "product_id": product_id, "quantity": quantity }),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn place_order(app: &TestApp, cart_id: &str, identity: Identity) -> (StatusCode, Value) {
    app.request(json_request(
        "POST",
        "/orders",
        &json!({ "cart_id": cart_id }),
        Some(identity),
    ))
    .await
}

/// Seed a product at $10.00 and fill a new cart with two of it.
async fn seeded_cart(app: &TestApp) -> (String, Value) {
    let product_id = app.seed_product("Field Notebook", Decimal::new(1000, 2));
    let cart_id = create_cart(app).await;
    add_to_cart(app, &cart_id, json!(product_id), 2).await;
    (cart_id, json!(product_id))
}

#[tokio::test]
async fn unauthenticated_checkout_returns_401() {
    let app = TestApp::new();

    let (status, _) = app
        .request(json_request("POST", "/orders", &json!({}), None))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn omitting_the_cart_returns_400() {
    let app = TestApp::new();

    let (status, body) = app
        .request(json_request(
            "POST",
            "/orders",
            &json!({}),
            Some(Identity::user(1)),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["cart_id"].is_null());
}

#[tokio::test]
async fn an_unknown_cart_returns_400() {
    let app = TestApp::new();
    let ghost = uuid::Uuid::new_v4().to_string();

    let (status, body) = place_order(&app, &ghost, Identity::user(1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["cart_id"].is_null());
}

#[tokio::test]
async fn an_empty_cart_returns_400() {
    let app = TestApp::new();
    let cart_id = create_cart(&app).await;

    let (status, body) = place_order(&app, &cart_id, Identity::user(1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["cart_id"].is_null());
}

#[tokio::test]
async fn missing_and_empty_carts_produce_the_same_error_shape() {
    let app = TestApp::new();
    let cart_id = create_cart(&app).await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let (_, empty_body) = place_order(&app, &cart_id, Identity::user(1)).await;
    let (_, missing_body) = place_order(&app, &ghost, Identity::user(1)).await;

    assert_eq!(empty_body, missing_body);
}

#[tokio::test]
async fn valid_checkout_creates_an_order() {
    let mut app = TestApp::new();
    let (cart_id, product_id) = seeded_cart(&app).await;

    let (status, body) = place_order(&app, &cart_id, Identity::user(1)).await;

    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["id"].as_i64().expect("order id");
    assert_eq!(body["payment_status"], json!("pending"));
    assert_eq!(body["total_price"], json!("20.00"));

    let items = body["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product"]["id"], product_id);
    assert_eq!(items[0]["quantity"], json!(2));
    assert_eq!(items[0]["unit_price"], json!("10.00"));

    // a customer profile was created for the user
    let customer = app
        .store()
        .read(|txn| txn.customers().get_by_user(UserId::new(1)))
        .expect("customer");
    assert_eq!(customer.user_id, UserId::new(1));

    // and the confirmation was enqueued exactly once
    let event = app.next_event().expect("order placed event");
    assert_eq!(i64::from(event.order_id.as_i32()), order_id);
    assert!(app.next_event().is_none());
}

#[tokio::test]
async fn checkout_deletes_the_cart() {
    let app = TestApp::new();
    let (cart_id, _) = seeded_cart(&app).await;

    let (status, _) = place_order(&app, &cart_id, Identity::user(1)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(bare_request("GET", &format!("/carts/{cart_id}"), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // a second checkout of the consumed cart fails like any unknown cart
    let (status, body) = place_order(&app, &cart_id, Identity::user(1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["cart_id"].is_null());
}

#[tokio::test]
async fn a_failed_checkout_leaves_the_cart_untouched() {
    let mut app = TestApp::new();
    let product_id = app.seed_product("Field Notebook", Decimal::new(1000, 2));
    let cart_id = create_cart(&app).await;
    add_to_cart(&app, &cart_id, json!(product_id), 2).await;

    // pull the product out from under the cart to make checkout fail
    app.store()
        .transaction(|uow| uow.products().delete(product_id))
        .expect("delete product");

    let (status, _) = place_order(&app, &cart_id, Identity::user(1)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // the cart and its line survive; no order or event was produced
    let items = app
        .store()
        .read(|txn| txn.carts().items(oxcart_core::CartId::parse(&cart_id).expect("token")));
    assert_eq!(items.len(), 1);
    assert_eq!(app.store().read(|txn| txn.orders().count()), 0);
    assert!(app.next_event().is_none());
}

#[tokio::test]
async fn unauthenticated_order_reads_return_401() {
    let app = TestApp::new();

    let (status, _) = app.request(bare_request("GET", "/orders/1", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn the_owner_can_read_their_order() {
    let app = TestApp::new();
    let (cart_id, _) = seeded_cart(&app).await;
    let (_, placed) = place_order(&app, &cart_id, Identity::user(1)).await;
    let order_id = placed["id"].as_i64().expect("order id");

    let (status, body) = app
        .request(bare_request(
            "GET",
            &format!("/orders/{order_id}"),
            Some(Identity::user(1)),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(order_id));
}

#[tokio::test]
async fn another_users_order_is_forbidden() {
    let app = TestApp::new();
    let (cart_id, _) = seeded_cart(&app).await;
    let (_, placed) = place_order(&app, &cart_id, Identity::user(1)).await;
    let order_id = placed["id"].as_i64().expect("order id");

    let (status, _) = app
        .request(bare_request(
            "GET",
            &format!("/orders/{order_id}"),
            Some(Identity::user(2)),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn staff_can_read_any_order() {
    let app = TestApp::new();
    let (cart_id, _) = seeded_cart(&app).await;
    let (_, placed) = place_order(&app, &cart_id, Identity::user(1)).await;
    let order_id = placed["id"].as_i64().expect("order id");

    let (status, body) = app
        .request(bare_request(
            "GET",
            &format!("/orders/{order_id}"),
            Some(Identity::staff(2)),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(order_id));
}

#[tokio::test]
async fn an_unknown_order_is_404_even_for_staff() {
    let app = TestApp::new();

    let (status, _) = app
        .request(bare_request("GET", "/orders/999", Some(Identity::staff(1))))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_items_keep_their_purchase_price() {
    let app = TestApp::new();
    let product_id = app.seed_product("Field Notebook", Decimal::new(1000, 2));
    let cart_id = create_cart(&app).await;
    add_to_cart(&app, &cart_id, json!(product_id), 2).await;
    let (_, placed) = place_order(&app, &cart_id, Identity::user(1)).await;
    let order_id = placed["id"].as_i64().expect("order id");

    products::set_price(app.store(), product_id, Decimal::new(2000, 2)).expect("reprice");

    let (_, body) = app
        .request(bare_request(
            "GET",
            &format!("/orders/{order_id}"),
            Some(Identity::user(1)),
        ))
        .await;

    let item = &body["items"][0];
    // the captured price and totals are frozen; the nested product shows
    // the current catalog price
    assert_eq!(item["unit_price"], json!("10.00"));
    assert_eq!(item["total_price"], json!("20.00"));
    assert_eq!(body["total_price"], json!("20.00"));
    assert_eq!(item["product"]["unit_price"], json!("20.00"));
}
