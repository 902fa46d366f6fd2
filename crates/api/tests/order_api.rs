//! HTTP-level integration tests for orders.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, customer_token, get, get_auth, post_json,
    post_json_auth, post_raw_auth, put_json_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn order_body(order_number: &str) -> Value {
    json!({
        "orderNumber": order_number,
        "totalAmount": 20.0,
        "items": [{"product": "p1", "qty": 2, "price": 10.0}],
        "shippingInfo": {"name": "Ada", "city": "Lisbon", "zip": "1000-001"}
    })
}

async fn create_order(pool: &PgPool, body: Value, token: Option<&str>) -> Value {
    let app = build_test_app(pool.clone());
    let response = match token {
        Some(token) => post_json_auth(app, "/api/v1/orders", body, token).await,
        None => post_json(app, "/api/v1/orders", body).await,
    };
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_guest_order_stores_snapshot(pool: PgPool) {
    let order = create_order(&pool, order_body("ORD-1"), None).await;

    assert!(order["id"].is_i64());
    assert_eq!(order["orderNumber"], "ORD-1");
    assert_eq!(order["userId"], Value::Null);
    assert_eq!(order["totalAmount"], 20.0);
    assert_eq!(order["items"], json!([{"product": "p1", "qty": 2, "price": 10.0}]));
    assert_eq!(order["shippingInfo"]["city"], "Lisbon");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signed_in_order_records_principal(pool: PgPool) {
    let order = create_order(&pool, order_body("ORD-2"), Some(&customer_token(77))).await;
    assert_eq!(order["userId"], 77);

    // An explicit userId wins over the token.
    let mut body = order_body("ORD-3");
    body["userId"] = json!(12);
    let order = create_order(&pool, body, Some(&customer_token(77))).await;
    assert_eq!(order["userId"], 12);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_rejected_on_order(pool: PgPool) {
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/orders",
        order_body("ORD-4"),
        "not-a-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_validation_errors(pool: PgPool) {
    let cases = [
        json!({"totalAmount": 20.0, "items": [{}], "shippingInfo": {}}),
        json!({"orderNumber": "X", "totalAmount": -1, "items": [{}], "shippingInfo": {}}),
        json!({"orderNumber": "X", "totalAmount": 1, "items": [], "shippingInfo": {}}),
        json!({"orderNumber": "X", "totalAmount": 1, "items": [{}], "shippingInfo": "home"}),
        json!({"orderNumber": "X", "totalAmount": "lots", "items": [{}], "shippingInfo": {}}),
    ];
    for body in cases {
        let response = post_json(build_test_app(pool.clone()), "/api/v1/orders", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let list = get_auth(build_test_app(pool), "/api/v1/orders", &admin_token()).await;
    assert_eq!(body_json(list).await["data"], json!([]), "nothing written");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_order_numbers_are_stored(pool: PgPool) {
    let a = create_order(&pool, order_body("ORD-DUP"), None).await;
    let b = create_order(&pool, order_body("ORD-DUP"), None).await;
    assert_ne!(a["id"], b["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_amount_stored_as_sent(pool: PgPool) {
    let mut body = order_body("ORD-PREC");
    body["totalAmount"] = json!(20.005);
    let order = create_order(&pool, body, None).await;
    assert_eq!(order["totalAmount"], 20.005);

    let mut body = order_body("ORD-BIG");
    body["totalAmount"] = json!(12345678901.25);
    let order = create_order(&pool, body, None).await;
    assert_eq!(order["totalAmount"], 12345678901.25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_order_body_uses_error_envelope(pool: PgPool) {
    let response = post_raw_auth(
        build_test_app(pool.clone()),
        "/api/v1/orders",
        "application/json",
        "{\"orderNumber\": ",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());

    let response = post_raw_auth(
        build_test_app(pool),
        "/api/v1/orders",
        "text/plain",
        "{}",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_MEDIA_TYPE");
}

// ---------------------------------------------------------------------------
// Snapshot independence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_unaffected_by_product_edit(pool: PgPool) {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({
            "name": "Moisturizer", "price": 10.0, "category": "skincare", "brand": "cerave",
            "image": "/x.jpg", "imageGallery": [], "filterItems": {}
        }),
        &admin_token(),
    )
    .await;
    let product_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut body = order_body("ORD-SNAP");
    body["items"] = json!([{"productId": product_id, "name": "Moisturizer", "qty": 2, "price": 10.0}]);
    let order = create_order(&pool, body, Some(&customer_token(9))).await;
    let order_id = order["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/products/{product_id}"),
        json!({"price": 99.0, "name": "Renamed"}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/orders/{order_id}"),
        &customer_token(9),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = body_json(response).await["data"].clone();
    assert_eq!(stored["items"][0]["price"], 10.0);
    assert_eq!(stored["items"][0]["name"], "Moisturizer");
    assert_eq!(stored["totalAmount"], 20.0);
}

// ---------------------------------------------------------------------------
// Read access
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_visibility(pool: PgPool) {
    let order = create_order(&pool, order_body("ORD-V"), Some(&customer_token(5))).await;
    let uri = format!("/api/v1/orders/{}", order["id"]);

    let owner = get_auth(build_test_app(pool.clone()), &uri, &customer_token(5)).await;
    assert_eq!(owner.status(), StatusCode::OK);

    let stranger = get_auth(build_test_app(pool.clone()), &uri, &customer_token(6)).await;
    assert_eq!(stranger.status(), StatusCode::FORBIDDEN);

    let admin = get_auth(build_test_app(pool.clone()), &uri, &admin_token()).await;
    assert_eq!(admin.status(), StatusCode::OK);

    let anonymous = get(build_test_app(pool), &uri).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_admin_only_and_filtered(pool: PgPool) {
    create_order(&pool, order_body("A"), Some(&customer_token(1))).await;
    create_order(&pool, order_body("B"), Some(&customer_token(2))).await;
    create_order(&pool, order_body("C"), Some(&customer_token(1))).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/orders", &customer_token(1)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(
        get_auth(build_test_app(pool.clone()), "/api/v1/orders", &admin_token()).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let json = body_json(
        get_auth(build_test_app(pool), "/api/v1/orders?user_id=1", &admin_token()).await,
    )
    .await;
    let numbers: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["orderNumber"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(numbers, vec!["C", "A"], "newest first");
}
