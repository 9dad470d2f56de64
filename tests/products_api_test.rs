mod common;

use std::collections::BTreeSet;

use axum::http::{Method, StatusCode};
use common::{date, response_json, TestApp};
use rust_decimal_macros::dec;
use sea_orm::ConnectionTrait;
use serde_json::Value;
use uuid::Uuid;

fn names(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn list_products_pages_newest_first() {
    let app = TestApp::new().await;
    for day in 1..=5 {
        app.seed_product(&format!("Dress {day}"), date(2024, 3, day), dec!(10.00))
            .await;
    }

    let response = app.get("/products/?page=1&page_size=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Products fetched successfully");
    assert_eq!(names(&body), vec!["Dress 5", "Dress 4"]);
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["page_size"], 2);
    assert_eq!(body["pagination"]["total_items"], 5);
    assert_eq!(body["pagination"]["total_pages"], 3);

    let last = response_json(app.get("/products/?page=3&page_size=2").await).await;
    assert_eq!(names(&last), vec!["Dress 1"]);
    assert_eq!(last["pagination"]["current_page"], 3);
}

#[tokio::test]
async fn list_products_summary_omits_detail_fields() {
    let app = TestApp::new().await;
    app.seed_product("Linen Shirt", date(2024, 1, 10), dec!(42.5))
        .await;

    let body = response_json(app.get("/products").await).await;
    let summary = &body["products"][0];

    assert_eq!(summary["price"], "42.50");
    assert_eq!(summary["date"], "2024-01-10");
    assert_eq!(summary["image"], "/media/products/linen_shirt.jpg");
    assert!(summary.get("description").is_none());
    assert!(summary.get("sample_type").is_none());
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let app = TestApp::new().await;
    app.seed_product("Only", date(2024, 1, 1), dec!(1.00)).await;

    let response = app.get("/products/?page=9").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["products"].as_array().expect("array").is_empty());
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn empty_catalog_has_zero_pages() {
    let app = TestApp::new().await;

    let body = response_json(app.get("/products/").await).await;
    assert_eq!(body["pagination"]["total_items"], 0);
    assert_eq!(body["pagination"]["total_pages"], 0);
}

#[tokio::test]
async fn invalid_pagination_is_rejected() {
    let app = TestApp::new().await;

    for query in ["page=0", "page=abc", "page_size=0", "page_size=-3"] {
        let response = app.get(&format!("/products/?{query}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query}");
        let body = response_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Invalid pagination parameters");
    }
}

#[tokio::test]
async fn oversized_pagination_is_rejected() {
    let app = TestApp::new().await;
    app.seed_product("Only", date(2024, 1, 1), dec!(1.00)).await;

    for query in [
        "page=9223372036854775807&page_size=10",
        "page=3&page_size=9223372036854775807",
        "page=99999999999999999999",
    ] {
        let response = app.get(&format!("/products/?{query}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query}");
        let body = response_json(response).await;
        assert_eq!(body["message"], "Invalid pagination parameters");
    }
}

#[tokio::test]
async fn database_failures_return_generic_errors() {
    let app = TestApp::new().await;
    app.db()
        .execute_unprepared("DROP TABLE products")
        .await
        .expect("drop products table");

    let response = app.get("/products/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "An error occurred while fetching products");
    assert!(!body.to_string().contains("no such table"));

    let response = app.get(&format!("/products/{}/", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "An error occurred while fetching product details"
    );
    assert!(!body.to_string().contains("no such table"));
}

#[tokio::test]
async fn product_detail_includes_images_and_materials() {
    let app = TestApp::new().await;
    let product = app
        .seed_product("Wool Coat", date(2024, 2, 2), dec!(199.99))
        .await;
    let front = app.seed_image(product.id, "gallery/front.jpg").await;
    let back = app.seed_image(product.id, "gallery/back.jpg").await;
    let wool = app.seed_material(product.id, "Wool").await;

    // Attachments of other products stay out of the detail.
    let other = app.seed_product("Scarf", date(2024, 2, 3), dec!(15)).await;
    app.seed_image(other.id, "gallery/scarf.jpg").await;
    app.seed_material(other.id, "Cashmere").await;

    let response = app.get(&format!("/products/{}/", product.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["message"], "Product details fetched successfully");
    let detail = &body["product"];
    assert_eq!(detail["id"], product.id.to_string());
    assert_eq!(detail["name"], "Wool Coat");
    assert_eq!(detail["description"], "Wool Coat seeded for integration tests");
    assert_eq!(detail["sample_type"], "Proto");
    assert_eq!(detail["price"], "199.99");

    let image_ids: BTreeSet<String> = detail["images"]
        .as_array()
        .expect("images")
        .iter()
        .map(|i| i["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(
        image_ids,
        BTreeSet::from([front.id.to_string(), back.id.to_string()])
    );
    assert!(detail["images"]
        .as_array()
        .expect("images")
        .iter()
        .any(|i| i["image_url"] == "/media/gallery/front.jpg"));

    let materials = detail["materials"].as_array().expect("materials");
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0]["id"], wool.id.to_string());
    assert_eq!(materials[0]["material"], "Wool");
}

#[tokio::test]
async fn product_without_attachments_has_empty_lists() {
    let app = TestApp::new().await;
    let product = app.seed_product("Plain Tee", date(2024, 5, 5), dec!(9)).await;

    let body = response_json(app.get(&format!("/products/{}", product.id)).await).await;
    assert_eq!(body["product"]["images"], Value::Array(vec![]));
    assert_eq!(body["product"]["materials"], Value::Array(vec![]));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    let response = app.get(&format!("/products/{missing}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        format!("Product not found with id: {missing}")
    );
}

#[tokio::test]
async fn malformed_product_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/products/not-a-uuid/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Product not found with id: not-a-uuid");
}

#[tokio::test]
async fn product_responses_are_cached_per_cookie() {
    let app = TestApp::new().await;
    app.seed_product("First", date(2024, 1, 1), dec!(5)).await;

    let first = app
        .request(Method::GET, "/products/", None, Some("sessionid=alice"))
        .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert_eq!(first.headers()["vary"], "Cookie");
    assert_eq!(first.headers()["cache-control"], "max-age=900");

    // A write inside the window is invisible to the cached response.
    app.seed_product("Second", date(2024, 6, 1), dec!(5)).await;

    let repeat = app
        .request(Method::GET, "/products/", None, Some("sessionid=alice"))
        .await;
    assert_eq!(repeat.headers()["x-cache"], "HIT");
    let cached = response_json(repeat).await;
    assert_eq!(names(&cached), vec!["First"]);

    let other = app
        .request(Method::GET, "/products/", None, Some("sessionid=bob"))
        .await;
    assert_eq!(other.headers()["x-cache"], "MISS");
    let fresh = response_json(other).await;
    assert_eq!(names(&fresh), vec!["Second", "First"]);
}

#[tokio::test]
async fn not_found_responses_are_not_cached() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();
    let uri = format!("/products/{id}/");

    let missing = app.get(&uri).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let repeat = app.get(&uri).await;
    assert_eq!(repeat.status(), StatusCode::NOT_FOUND);
    assert_ne!(
        repeat.headers().get("x-cache").map(|v| v.as_bytes()),
        Some(&b"HIT"[..])
    );
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["details"]["database"]["status"], "up");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
