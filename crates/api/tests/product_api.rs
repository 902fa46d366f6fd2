//! HTTP-level integration tests for products.
//!
//! Reference data is created through the repository layer to keep the
//! tests focused on product behaviour.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, customer_token, delete_auth, get, post_json_auth,
    post_raw_auth, put_json_auth,
};
use lustre_db::models::brand::CreateBrand;
use lustre_db::models::category::CreateCategory;
use lustre_db::repositories::{BrandRepo, CategoryRepo};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_reference(pool: &PgPool) -> (i64, i64) {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "Skincare".to_string(),
            slug: "skincare".to_string(),
            image: None,
        },
    )
    .await
    .unwrap();
    let brand = BrandRepo::create(
        pool,
        &CreateBrand {
            name: "CeraVe".to_string(),
            slug: "cerave".to_string(),
        },
    )
    .await
    .unwrap();
    (category.id, brand.id)
}

fn moisturizer() -> Value {
    json!({
        "name": "Moisturizer",
        "price": 19.99,
        "category": "skincare",
        "brand": "cerave",
        "image": "/x.jpg",
        "imageGallery": ["/x1.jpg"],
        "filterItems": {"skinType": "dry"}
    })
}

async fn create_product(pool: &PgPool, body: Value) -> Value {
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/products", body, &admin_token())
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_resolves_relations(pool: PgPool) {
    let (category_id, brand_id) = seed_reference(&pool).await;

    let product = create_product(&pool, moisturizer()).await;

    assert_eq!(product["categoryId"], category_id);
    assert_eq!(product["brandId"], brand_id);
    assert_eq!(product["category"], "skincare");
    assert_eq!(product["price"], 19.99);
    assert_eq!(product["isStocked"], true);
    assert_eq!(product["isNew"], false);
    assert_eq!(product["imageGallery"], json!(["/x1.jpg"]));
    let number = product["productNumber"].as_str().unwrap();
    assert!(number.starts_with("IN") && number.len() == 6, "got {number}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_with_unknown_slug(pool: PgPool) {
    seed_reference(&pool).await;
    let mut body = moisturizer();
    body["brand"] = json!("no-such-brand");

    let product = create_product(&pool, body).await;

    assert_eq!(product["brand"], "no-such-brand");
    assert_eq!(product["brandId"], Value::Null);
    assert!(product["categoryId"].is_i64());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_validation(pool: PgPool) {
    let mut negative = moisturizer();
    negative["price"] = json!(-3);
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/products", negative, &admin_token())
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut missing = moisturizer();
    missing.as_object_mut().unwrap().remove("name");
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/products", missing, &admin_token())
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_raw_auth(
        build_test_app(pool),
        "/api/v1/products",
        "application/json",
        "{\"name\": \"Moisturizer\",",
        Some(&admin_token()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_requires_admin(pool: PgPool) {
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/products",
        moisturizer(),
        &customer_token(3),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_supplied_product_number_kept(pool: PgPool) {
    let mut body = moisturizer();
    body["productNumber"] = json!("SKU-001");
    let product = create_product(&pool, body).await;
    assert_eq!(product["productNumber"], "SKU-001");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_product_and_not_found(pool: PgPool) {
    let product = create_product(&pool, moisturizer()).await;
    let id = product["id"].as_i64().unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Moisturizer");

    let response = get(build_test_app(pool), "/api/v1/products/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_products_filters(pool: PgPool) {
    let (category_id, _) = seed_reference(&pool).await;
    create_product(&pool, moisturizer()).await;
    let mut lipstick = moisturizer();
    lipstick["name"] = json!("Lipstick");
    lipstick["category"] = json!("makeup");
    create_product(&pool, lipstick).await;

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/products").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json =
        body_json(get(build_test_app(pool.clone()), "/api/v1/products?category=makeup").await)
            .await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Lipstick");

    let uri = format!("/api/v1/products?category_id={category_id}");
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Moisturizer");

    let json = body_json(get(build_test_app(pool), "/api/v1/products?limit=1&offset=1").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_product_relinks_category(pool: PgPool) {
    seed_reference(&pool).await;
    let mut body = moisturizer();
    body["category"] = json!("makeup");
    let product = create_product(&pool, body).await;
    assert_eq!(product["categoryId"], Value::Null);
    let id = product["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/products/{id}"),
        json!({"category": "skincare", "isSale": true, "oldPrice": 25.0}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();

    let skincare = CategoryRepo::find_id_by_slug(&pool, "skincare").await.unwrap();
    assert_eq!(updated["categoryId"], json!(skincare));
    assert_eq!(updated["category"], "skincare");
    assert_eq!(updated["isSale"], true);
    assert_eq!(updated["oldPrice"], 25.0);
    // Untouched fields survive.
    assert_eq!(updated["name"], "Moisturizer");
    assert!(updated["brandId"].is_i64());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_product_is_404(pool: PgPool) {
    let response = put_json_auth(
        build_test_app(pool),
        "/api/v1/products/424242",
        json!({"name": "Ghost"}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_product(pool: PgPool) {
    let product = create_product(&pool, moisturizer()).await;
    let uri = format!("/api/v1/products/{}", product["id"]);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
