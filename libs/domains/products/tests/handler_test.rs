//! Handler tests for the product catalog
//!
//! These drive `handlers::router` over the in-memory repository and check:
//! - Status codes for every route
//! - Response bodies (bare ids, arrays, single objects, counts)
//! - Error envelopes and their fixed messages
//!
//! The Postgres-backed paths are covered in `integration_test.rs`.

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn new_product(name: &str, category: &str, cents: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        category: category.to_string(),
        price: Decimal::new(cents, 2),
    }
}

/// Router over an in-memory catalog holding `names` (category "Tools").
async fn app_with(names: &[&str]) -> Router {
    let service = ProductService::new(InMemoryProductRepository::new());
    for name in names {
        let outcome = service
            .add_product(new_product(name, "Tools", 1000))
            .await
            .unwrap();
        assert!(outcome.success, "seeding {} failed", name);
    }
    handlers::router(service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Bytes) {
    send(app, method, uri, Body::from(body.to_string())).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Bytes) {
    send(app, "GET", uri, Body::empty()).await
}

fn parse<T: serde::de::DeserializeOwned>(bytes: &Bytes) -> T {
    serde_json::from_slice(bytes).unwrap()
}

fn error_message(bytes: &Bytes) -> String {
    let body: Value = parse(bytes);
    body["message"].as_str().unwrap_or_default().to_string()
}

fn names(bytes: &Bytes) -> Vec<String> {
    parse::<Vec<Product>>(bytes)
        .into_iter()
        .map(|p| p.name)
        .collect()
}

// ============================================================================
// POST /product
// ============================================================================

#[tokio::test]
async fn test_add_product_returns_201_with_id() {
    let app = app_with(&[]).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/product",
        json!({ "name": "Widget", "description": "Blue", "category": "Tools", "price": 9.99 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse::<i32>(&body), 1);

    let (status, body) = send_json(
        &app,
        "POST",
        "/product",
        json!({ "name": "Gadget", "category": "Tools", "price": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse::<i32>(&body), 2);
}

#[tokio::test]
async fn test_add_product_stores_price_in_cents() {
    let app = app_with(&[]).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/product",
        json!({ "name": "Widget", "category": "Tools", "price": 2.346 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get(&app, "/product/1").await;
    let product: Product = parse(&body);
    assert_eq!(product.price, Decimal::new(235, 2));
}

#[tokio::test]
async fn test_add_product_ignores_client_id() {
    let app = app_with(&["Widget"]).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/product",
        json!({ "id": 99, "name": "Gadget", "category": "Tools", "price": 1.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse::<i32>(&body), 2);
}

#[tokio::test]
async fn test_add_product_duplicate_name_ignores_case() {
    let app = app_with(&["Widget"]).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/product",
        json!({ "name": "WIDGET", "category": "Tools", "price": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), messages::PRODUCT_NAME_DUPLICATE);
}

#[tokio::test]
async fn test_add_product_rejects_null_and_empty_body() {
    let app = app_with(&[]).await;

    for body in ["null", "", "  "] {
        let (status, bytes) = send(&app, "POST", "/product", Body::from(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(error_message(&bytes), messages::PRODUCT_EMPTY);
    }
}

#[tokio::test]
async fn test_add_product_malformed_json() {
    let app = app_with(&[]).await;

    let (status, bytes) = send(&app, "POST", "/product", Body::from("{\"name\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: Value = parse(&bytes);
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_add_product_field_validation() {
    let app = app_with(&[]).await;

    let cases = [
        (
            json!({ "name": "", "category": "Tools", "price": 1 }),
            messages::PRODUCT_NAME_EMPTY,
        ),
        (
            json!({ "name": "Widget", "category": "", "price": 1 }),
            messages::PRODUCT_CATEGORY_EMPTY,
        ),
        (
            json!({ "name": "Widget", "category": "Tools", "price": 0 }),
            messages::PRODUCT_PRICE_LESS_THAN_ZERO,
        ),
        (
            json!({ "name": "Widget", "category": "Tools", "price": -2.5 }),
            messages::PRODUCT_PRICE_LESS_THAN_ZERO,
        ),
        // Rounds to 0.00, which is what the store would keep
        (
            json!({ "name": "Widget", "category": "Tools", "price": 0.004 }),
            messages::PRODUCT_PRICE_LESS_THAN_ZERO,
        ),
        (
            json!({ "name": "Widget", "category": "Tools", "price": 1e16 }),
            messages::PRODUCT_PRICE_TOO_LARGE,
        ),
        // Missing fields fall back to defaults and fail the same checks
        (json!({ "category": "Tools", "price": 1 }), messages::PRODUCT_NAME_EMPTY),
    ];

    for (payload, expected) in cases {
        let (status, bytes) = send_json(&app, "POST", "/product", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);

        let body: Value = parse(&bytes);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], expected);
    }

    let (_, count) = get(&app, "/product/total-count").await;
    assert_eq!(error_message(&count), messages::PRODUCT_NOT_FOUND);
}

// ============================================================================
// GET /product, /product/{id}
// ============================================================================

#[tokio::test]
async fn test_get_all_empty_catalog_is_200_without_body() {
    let app = app_with(&[]).await;

    let (status, body) = get(&app, "/product").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_get_all_returns_array() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let (status, body) = get(&app, "/product").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Widget", "Gadget"]);
}

#[tokio::test]
async fn test_get_by_id_returns_single_object() {
    let app = app_with(&["Widget"]).await;

    let (status, body) = get(&app, "/product/1").await;
    assert_eq!(status, StatusCode::OK);

    let product: Product = parse(&body);
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description.as_deref(), Some("Widget description"));
    assert_eq!(product.price, Decimal::new(1000, 2));
}

#[tokio::test]
async fn test_get_by_id_missing_and_negative_are_404() {
    let app = app_with(&["Widget"]).await;

    for uri in ["/product/42", "/product/-1"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(error_message(&body), messages::PRODUCT_NOT_FOUND);
    }
}

#[tokio::test]
async fn test_get_by_id_non_numeric_is_400() {
    let app = app_with(&["Widget"]).await;

    let (status, bytes) = get(&app, "/product/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: Value = parse(&bytes);
    assert_eq!(body["error"], "INVALID_ID");
}

// ============================================================================
// GET /product/search, /product/total-count, /product/category/{category}
// ============================================================================

#[tokio::test]
async fn test_search_matches_substring_ignoring_case() {
    let app = app_with(&["Widget", "Gadget", "Widescreen"]).await;

    let (status, body) = get(&app, "/product/search?name=wid").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Widget", "Widescreen"]);
}

#[tokio::test]
async fn test_search_without_name_returns_everything() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let (status, body) = get(&app, "/product/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 2);

    let (status, body) = get(&app, "/product/search?name=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 2);
}

#[tokio::test]
async fn test_search_no_match_is_empty_array() {
    let app = app_with(&["Widget"]).await;

    let (status, body) = get(&app, "/product/search?name=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_total_count() {
    let app = app_with(&[]).await;

    let (status, body) = get(&app, "/product/total-count").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), messages::PRODUCT_NOT_FOUND);

    let app = app_with(&["Widget", "Gadget", "Gizmo"]).await;
    let (status, body) = get(&app, "/product/total-count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<u64>(&body), 3);
}

#[tokio::test]
async fn test_get_by_category_ignores_case() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let (status, body) = get(&app, "/product/category/tOOLS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 2);

    let (status, body) = get(&app, "/product/category/Garden").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), messages::PRODUCT_NOT_FOUND);
}

// ============================================================================
// GET /product/sort
// ============================================================================

#[tokio::test]
async fn test_sort_ascending_and_descending() {
    let app = app_with(&["Banana", "Apple", "Cherry"]).await;

    for order in ["asc", "Ascending", "ASC"] {
        let (status, body) = get(&app, &format!("/product/sort?order={}", order)).await;
        assert_eq!(status, StatusCode::OK, "order {}", order);
        assert_eq!(names(&body), vec!["Apple", "Banana", "Cherry"]);
    }

    for order in ["desc", "Descending"] {
        let (status, body) = get(&app, &format!("/product/sort?order={}", order)).await;
        assert_eq!(status, StatusCode::OK, "order {}", order);
        assert_eq!(names(&body), vec!["Cherry", "Banana", "Apple"]);
    }
}

#[tokio::test]
async fn test_sort_rejects_missing_or_unknown_order() {
    let app = app_with(&["Widget"]).await;

    for uri in ["/product/sort", "/product/sort?order=sideways", "/product/sort?order="] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(error_message(&body), messages::INVALID_SORT_ORDER);
    }
}

#[tokio::test]
async fn test_sort_empty_catalog_is_400() {
    let app = app_with(&[]).await;

    let (status, body) = get(&app, "/product/sort?order=asc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), messages::PRODUCT_NOT_FOUND);
}

// ============================================================================
// PUT /product
// ============================================================================

#[tokio::test]
async fn test_update_product_returns_204() {
    let app = app_with(&["Widget"]).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/product",
        json!({ "id": 1, "name": "Widget Pro", "category": "Hardware", "price": 19.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, body) = get(&app, "/product/1").await;
    let product: Product = parse(&body);
    assert_eq!(product.name, "Widget Pro");
    assert_eq!(product.category, "Hardware");
    assert_eq!(product.description, None);
    assert_eq!(product.price, Decimal::new(1950, 2));
}

#[tokio::test]
async fn test_update_product_keeping_own_name() {
    let app = app_with(&["Widget"]).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        "/product",
        json!({ "id": 1, "name": "widget", "category": "Tools", "price": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_product_failures() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let cases = [
        (
            json!({ "id": 2, "name": "WIDGET", "category": "Tools", "price": 2 }),
            messages::PRODUCT_NAME_DUPLICATE,
        ),
        (
            json!({ "id": 7, "name": "Gizmo", "category": "Tools", "price": 2 }),
            messages::PRODUCT_NOT_FOUND,
        ),
        (
            json!({ "id": -1, "name": "", "category": "Tools", "price": 2 }),
            messages::PRODUCT_ID_LESS_THAN_ZERO,
        ),
        (
            json!({ "id": 1, "name": "Widget", "category": "Tools", "price": 0 }),
            messages::PRODUCT_PRICE_LESS_THAN_ZERO,
        ),
        (Value::Null, messages::PRODUCT_EMPTY),
    ];

    for (payload, expected) in cases {
        let (status, body) = send_json(&app, "PUT", "/product", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(error_message(&body), expected);
    }
}

// ============================================================================
// DELETE /product, /product/{id}
// ============================================================================

#[tokio::test]
async fn test_delete_all_is_always_204() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let (status, _) = send(&app, "DELETE", "/product", Body::empty()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Already empty
    let (status, _) = send(&app, "DELETE", "/product", Body::empty()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/product/total-count").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_by_id() {
    let app = app_with(&["Widget", "Gadget"]).await;

    let (status, _) = send(&app, "DELETE", "/product/1", Body::empty()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/product/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/product/1", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), messages::PRODUCT_NOT_FOUND);

    let (_, body) = get(&app, "/product").await;
    assert_eq!(names(&body), vec!["Gadget"]);
}

#[tokio::test]
async fn test_delete_by_id_non_numeric_is_400() {
    let app = app_with(&["Widget"]).await;

    let (status, _) = send(&app, "DELETE", "/product/first", Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
