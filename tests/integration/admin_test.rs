//! Integration tests for the admin surface: guard, category and product
//! administration, and image uploads.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{PNG_BYTES, TestApp, slugs_of};

#[tokio::test]
async fn test_admin_requires_token() {
    let app = TestApp::new().await;
    let body = json!({ "name": "Kids" });

    let missing = app
        .request("POST", "/api/admin/categories", Some(body.clone()), None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let wrong = app
        .request("POST", "/api/admin/categories", Some(body), Some("nope"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let listing = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(listing.body["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_create_category_is_visible_immediately() {
    let app = TestApp::new().await;

    // Warm the cache first.
    let before = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(before.body["data"].as_array().map(Vec::len), Some(5));

    let created = app
        .admin(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Kids' Shoes", "parent_id": null })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["slug"], "kids-shoes");

    let view = app
        .request("GET", "/api/categories/kids-shoes", None, None)
        .await;
    assert_eq!(view.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_category_validation_and_conflict() {
    let app = TestApp::new().await;

    let empty = app
        .admin("POST", "/api/admin/categories", Some(json!({ "name": "" })))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert!(empty.body["details"]["name"].is_array());

    let orphan = app
        .admin(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Orphan", "parent_id": 404 })),
        )
        .await;
    assert_eq!(orphan.status, StatusCode::BAD_REQUEST);

    let duplicate = app
        .admin(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Men again", "slug": "men" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reparent_rules() {
    let app = TestApp::new().await;

    let cycle = app
        .admin(
            "PUT",
            "/api/admin/categories/1",
            Some(json!({ "name": "Men", "parent_id": 5 })),
        )
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);

    let moved = app
        .admin(
            "PUT",
            "/api/admin/categories/5",
            Some(json!({ "name": "Oxford", "parent_id": 1 })),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.body["data"]["slug"], "men-shirts-oxford");

    let shirts = app
        .request("GET", "/api/categories/men-shirts/products", None, None)
        .await;
    assert_eq!(shirts.item_slugs(), vec!["oxford-shirt"]);

    let view = app
        .request("GET", "/api/categories/men-shirts-oxford", None, None)
        .await;
    assert_eq!(slugs_of(&view.body["data"]["ancestor_path"]), vec!["men"]);
}

#[tokio::test]
async fn test_delete_category_policy() {
    let app = TestApp::new().await;

    let with_products = app.admin("DELETE", "/api/admin/categories/2", None).await;
    assert_eq!(with_products.status, StatusCode::CONFLICT);

    let created = app
        .admin(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Parent" })),
        )
        .await;
    let parent_id = created.body["data"]["id"].as_i64().expect("id");
    let child = app
        .admin(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Child", "parent_id": parent_id })),
        )
        .await;
    let child_id = child.body["data"]["id"].as_i64().expect("id");

    let with_children = app
        .admin("DELETE", &format!("/api/admin/categories/{parent_id}"), None)
        .await;
    assert_eq!(with_children.status, StatusCode::CONFLICT);

    let leaf = app
        .admin("DELETE", &format!("/api/admin/categories/{child_id}"), None)
        .await;
    assert_eq!(leaf.status, StatusCode::OK);

    let missing = app.admin("DELETE", "/api/admin/categories/999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = TestApp::new().await;

    // Warm the listing cache.
    let before = app
        .request("GET", "/api/categories/men-shoes/products", None, None)
        .await;
    assert_eq!(before.body["data"]["total_items"], 4);

    let created = app
        .admin(
            "POST",
            "/api/admin/products",
            Some(json!({
                "name": "Chelsea Boots",
                "description": "Leather",
                "price": 12000,
                "inventory": 3,
                "category_id": 3
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["slug"], "chelsea-boots");
    let id = created.body["data"]["id"].as_i64().expect("id");

    let after = app
        .request("GET", "/api/categories/men/products", None, None)
        .await;
    assert_eq!(after.item_slugs()[0], "chelsea-boots");

    let updated = app
        .admin(
            "PUT",
            &format!("/api/admin/products/{id}"),
            Some(json!({
                "name": "Chelsea Boot",
                "price": 11000,
                "inventory": 2,
                "featured": true,
                "category_id": 3
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["slug"], "chelsea-boots");
    assert_eq!(updated.body["data"]["price"], 11000);

    let featured = app
        .request("GET", "/api/products/featured", None, None)
        .await;
    assert_eq!(slugs_of(&featured.body["data"])[0], "chelsea-boots");

    let deleted = app
        .admin("DELETE", &format!("/api/admin/products/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", "/api/products/chelsea-boots", None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_validation() {
    let app = TestApp::new().await;

    let negative = app
        .admin(
            "POST",
            "/api/admin/products",
            Some(json!({ "name": "Freebie", "price": -1, "category_id": 1 })),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert!(negative.body["details"]["price"].is_array());

    let no_category = app
        .admin(
            "POST",
            "/api/admin/products",
            Some(json!({ "name": "Stray", "price": 100, "category_id": 404 })),
        )
        .await;
    assert_eq!(no_category.status, StatusCode::BAD_REQUEST);

    let taken = app
        .admin(
            "POST",
            "/api/admin/products",
            Some(json!({ "name": "Boots", "price": 100, "category_id": 3 })),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_image_upload_and_delete() {
    let app = TestApp::new().await;

    let uploaded = app
        .upload_image(11, "front.png", PNG_BYTES, Some(helpers::ADMIN_TOKEN))
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    let image = &uploaded.body["data"];
    assert_eq!(image["position"], 0);
    let url = image["url"].as_str().expect("url").to_string();
    let image_id = image["id"].as_i64().expect("id");
    assert!(url.starts_with("/images/products/11/"));
    assert!(url.ends_with(".png"));

    let second = app
        .upload_image(11, "back.png", PNG_BYTES, Some(helpers::ADMIN_TOKEN))
        .await;
    assert_eq!(second.body["data"]["position"], 1);

    let (status, bytes) = app.get_raw(&url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG_BYTES);

    let detail = app
        .request("GET", "/api/products/oxford-shirt", None, None)
        .await;
    assert_eq!(detail.body["data"]["images"].as_array().map(Vec::len), Some(2));

    let deleted = app
        .admin(
            "DELETE",
            &format!("/api/admin/products/11/images/{image_id}"),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let (status, _) = app.get_raw(&url).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_upload_rejections() {
    let app = TestApp::new().await;
    let token = Some(helpers::ADMIN_TOKEN);

    let unauthenticated = app.upload_image(11, "a.png", PNG_BYTES, None).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let not_image = app.upload_image(11, "a.txt", b"hello world", token).await;
    assert_eq!(not_image.status, StatusCode::BAD_REQUEST);

    let mut oversized = PNG_BYTES.to_vec();
    oversized.resize(4096, 0);
    let too_big = app.upload_image(11, "big.png", &oversized, token).await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);

    let missing_product = app.upload_image(404, "a.png", PNG_BYTES, token).await;
    assert_eq!(missing_product.status, StatusCode::NOT_FOUND);
}
