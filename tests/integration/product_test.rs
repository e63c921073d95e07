//! Integration tests for search, featured products, and product detail.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, slugs_of};

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = TestApp::new().await;

    for term in ["shirt", "SHIRT"] {
        let response = app
            .request("GET", &format!("/api/products?q={term}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.item_slugs(), vec!["oxford-shirt"]);
    }
}

#[tokio::test]
async fn test_search_without_term_lists_everything() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/products", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 9);
    assert_eq!(response.item_slugs()[0], "button-down");
}

#[tokio::test]
async fn test_search_applies_price_filter() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products?max_price=999", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.item_slugs(), vec!["loafers"]);
}

#[tokio::test]
async fn test_invalid_page_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products?per_page=0", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_featured_products_newest_first() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products/featured", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        slugs_of(&response.body["data"]),
        vec!["button-down", "summer-dress"]
    );
}

#[tokio::test]
async fn test_product_detail_has_breadcrumbs() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products/button-down", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let detail = &response.body["data"];
    assert_eq!(detail["slug"], "button-down");
    assert_eq!(detail["price"], 4500);
    assert_eq!(detail["category"]["slug"], "men-shirts-oxford");
    assert_eq!(
        slugs_of(&detail["breadcrumbs"]),
        vec!["men", "men-shirts", "men-shirts-oxford"]
    );
    assert_eq!(detail["images"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_product_with_dangling_category() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products/mystery-box", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["category"].is_null());
    assert!(slugs_of(&response.body["data"]["breadcrumbs"]).is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products/unicorn", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}
