//! Integration tests for category browsing and category-scoped listings.

mod helpers;

use http::StatusCode;
use serde_json::json;
use storefront_database::repositories::memory::{category_row, product_row};

use helpers::{TestApp, slugs_of};

#[tokio::test]
async fn test_health_reports_dependencies() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["status"], "ok");
    assert_eq!(data["database"], "in-memory");
    assert_eq!(data["cache"], "enabled");
    assert_eq!(data["storage"], "local: available");
}

#[tokio::test]
async fn test_list_categories() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/categories", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_category_tree() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/categories/tree", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let tree = &response.body["data"];
    assert_eq!(tree["total_categories"], 5);

    let mut roots = slugs_of(&tree["roots"]);
    roots.sort();
    assert_eq!(roots, vec!["men", "women"]);

    let men = tree["roots"]
        .as_array()
        .and_then(|r| r.iter().find(|n| n["slug"] == "men"))
        .expect("men root");
    let mut children = slugs_of(&men["children"]);
    children.sort();
    assert_eq!(children, vec!["men-shirts", "men-shoes"]);
}

#[tokio::test]
async fn test_resolve_category_by_slug() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/categories/men-shirts", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let view = &response.body["data"];
    assert_eq!(view["category"]["slug"], "men-shirts");
    assert_eq!(slugs_of(&view["ancestor_path"]), vec!["men"]);
    assert_eq!(slugs_of(&view["child_categories"]), vec!["men-shirts-oxford"]);
}

#[tokio::test]
async fn test_root_category_has_empty_ancestor_path() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/categories/women", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(slugs_of(&response.body["data"]["ancestor_path"]).is_empty());
    assert!(slugs_of(&response.body["data"]["child_categories"]).is_empty());
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/categories/kids", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");

    let response = app
        .request("GET", "/api/categories/kids/products", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_products_include_descendants() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/categories/men/products", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.item_slugs(),
        vec![
            "button-down",
            "trainers",
            "sneakers",
            "boots",
            "loafers",
            "oxford-shirt",
            "plain-tee"
        ]
    );
    assert_eq!(response.body["data"]["total_items"], 7);
}

#[tokio::test]
async fn test_price_bounds_are_inclusive() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/api/categories/men-shoes/products?min_price=1000&max_price=5000",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.item_slugs(), vec!["sneakers", "boots"]);
}

#[tokio::test]
async fn test_malformed_price_filter_is_rejected() {
    let app = TestApp::new().await;

    for query in ["min_price=cheap", "max_price=-1", "min_price=500&max_price=100"] {
        let response = app
            .request(
                "GET",
                &format!("/api/categories/men/products?{query}"),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "query: {query}");
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_category_products_pagination() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/api/categories/men/products?page=2&per_page=3",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.item_slugs(), vec!["boots", "loafers", "oxford-shirt"]);
    let page = &response.body["data"];
    assert_eq!(page["total_items"], 7);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["has_next"], true);
    assert_eq!(page["has_previous"], true);
}

#[tokio::test]
async fn test_category_without_products_is_empty_page() {
    let app = TestApp::with_catalog(helpers::seed_categories(), Vec::new()).await;

    let response = app
        .request("GET", "/api/categories/men/products", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.item_slugs().is_empty());
    assert_eq!(response.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_cyclic_categories_still_answer() {
    let app = TestApp::with_catalog(
        vec![
            category_row(1, "Loop A", "loop-a", Some(2)),
            category_row(2, "Loop B", "loop-b", Some(1)),
            category_row(3, "Inside", "inside", Some(2)),
        ],
        vec![product_row(30, "lost-sock", 3, 500)],
    )
    .await;

    let response = app
        .request("GET", "/api/categories/loop-a/products", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.item_slugs(), vec!["lost-sock"]);

    let tree = app.request("GET", "/api/categories/tree", None, None).await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.body["data"]["total_categories"], 3);

    let view = app.request("GET", "/api/categories/inside", None, None).await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(
        slugs_of(&view.body["data"]["ancestor_path"]).len(),
        2,
        "breadcrumb walk stops at the repeat"
    );
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = TestApp::new().await;
    app.categories.set_unavailable(true);

    let response = app.request("GET", "/api/categories/tree", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "UPSTREAM_FAILURE");
}

#[tokio::test]
async fn test_page_beyond_offset_range_is_rejected() {
    let app = TestApp::new().await;

    let path = format!("/api/categories/men/products?page={}", u64::MAX);
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let search = app
        .request("GET", &format!("/api/products?page={}", u64::MAX), None, None)
        .await;
    assert_eq!(search.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fixed_route_slugs_are_reserved() {
    let app = TestApp::new().await;

    let category = app
        .admin("POST", "/api/admin/categories", Some(json!({ "name": "Tree" })))
        .await;
    assert_eq!(category.status, StatusCode::BAD_REQUEST);
    assert_eq!(category.error_code(), "VALIDATION_ERROR");

    let product = app
        .admin(
            "POST",
            "/api/admin/products",
            Some(json!({
                "name": "Featured",
                "price": 1000,
                "category_id": 1
            })),
        )
        .await;
    assert_eq!(product.status, StatusCode::BAD_REQUEST);

    let tree = app.request("GET", "/api/categories/tree", None, None).await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.body["data"]["total_categories"], 5);
}
