//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use storefront_api::AppState;
use storefront_core::config::AppConfig;
use storefront_core::traits::storage::ImageStore;
use storefront_database::repositories::memory::{category_row, product_row};
use storefront_database::{MemoryCategoryStore, MemoryProductStore};
use storefront_entity::category::Category;
use storefront_entity::product::Product;
use storefront_storage::providers::LocalImageStore;

/// Token configured for the admin surface in every test app.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Multipart boundary used by upload requests.
const BOUNDARY: &str = "storefront-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Backing category store
    pub categories: Arc<MemoryCategoryStore>,
    /// Backing product store
    pub products: Arc<MemoryProductStore>,
    /// Image storage root, removed on drop
    pub images_dir: TempDir,
}

impl TestApp {
    /// Create a test application over the standard catalog
    pub async fn new() -> Self {
        Self::with_catalog(seed_categories(), seed_products()).await
    }

    /// Create a test application over the given rows
    pub async fn with_catalog(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let images_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.admin.api_token = Some(ADMIN_TOKEN.to_string());
        config.storage.local.root_path = images_dir.path().display().to_string();
        config.storage.max_image_size_bytes = 1024;

        let image_store: Arc<dyn ImageStore> = Arc::new(
            LocalImageStore::new(images_dir.path(), &config.storage.local.public_base_url)
                .await
                .expect("Failed to init image store"),
        );
        let categories = Arc::new(MemoryCategoryStore::with_rows(categories));
        let products = Arc::new(MemoryProductStore::with_rows(products));

        let state = AppState::new(
            config.clone(),
            None,
            categories.clone(),
            products.clone(),
            image_store,
        );

        Self {
            router: storefront_api::build_router(state),
            config,
            categories,
            products,
            images_dir,
        }
    }

    /// Send a JSON request and parse the JSON response
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a request to the admin surface with the configured token
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(ADMIN_TOKEN)).await
    }

    /// Upload `data` as the `file` field of a multipart form
    pub async fn upload_image(
        &self,
        product_id: i64,
        file_name: &str,
        data: &[u8],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri(format!("/api/admin/products/{product_id}/images"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");

        self.send(req).await
    }

    /// Fetch a path and return the status and raw body
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Slugs of `data.items`, in response order
    pub fn item_slugs(&self) -> Vec<String> {
        slugs_of(&self.body["data"]["items"])
    }

    /// The `error` code of an error response
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Slugs of a JSON array of objects
pub fn slugs_of(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["slug"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Men > {Shirts > Oxford, Shoes}; Women
pub fn seed_categories() -> Vec<Category> {
    vec![
        category_row(1, "Men", "men", None),
        category_row(2, "Shirts", "men-shirts", Some(1)),
        category_row(3, "Shoes", "men-shoes", Some(1)),
        category_row(4, "Women", "women", None),
        category_row(5, "Oxford", "men-shirts-oxford", Some(2)),
    ]
}

/// Products across the seed categories, plus one with a dangling category.
/// Higher ids are newer.
pub fn seed_products() -> Vec<Product> {
    let mut dress = product_row(17, "summer-dress", 4, 3000);
    dress.featured = true;
    let mut button_down = product_row(18, "button-down", 5, 4500);
    button_down.featured = true;

    vec![
        product_row(10, "plain-tee", 1, 2000),
        product_row(11, "oxford-shirt", 2, 3000),
        product_row(12, "mystery-box", 99, 1000),
        product_row(13, "loafers", 3, 999),
        product_row(14, "boots", 3, 1000),
        product_row(15, "sneakers", 3, 5000),
        product_row(16, "trainers", 3, 5001),
        dress,
        button_down,
    ]
}

/// Minimal PNG signature, enough for format detection.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
