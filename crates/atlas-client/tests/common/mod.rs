//! Shared fixtures for client integration tests: a wiremock server stands
//! in for the external ERP API.
#![allow(dead_code)]

use std::sync::Once;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atlas_client::{ApiClient, Credentials};

pub const TEST_TOKEN: &str = "tok-test-123";

static TRACING: Once = Once::new();

/// Installs a fmt subscriber once, honoring RUST_LOG for debugging.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Mounts `/auth/login` and returns a signed-in client.
pub async fn authed_client(server: &MockServer) -> ApiClient {
    init_tracing();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": TEST_TOKEN,
            "user": { "id": "u-1", "username": "amir", "role": "admin" }
        })))
        .mount(server)
        .await;

    let api = ApiClient::new(server.uri());
    api.login(&Credentials {
        username: "amir".to_string(),
        password: "secret".to_string(),
    })
    .await
    .expect("login against mock server");
    api
}

pub fn line_item_json(product_id: &str, qty: i64) -> Value {
    json!({
        "lineId": format!("line-{}", product_id),
        "productId": product_id,
        "sku": format!("SKU-{}", product_id),
        "name": format!("Product {}", product_id),
        "colorId": null,
        "quantity": qty,
        "unitPrice": "10.00",
        "discount": "0.00",
        "tax": "1.00",
        "lineTotal": "11.00"
    })
}

pub fn sales_order_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "number": format!("SO-{}", id),
        "customerId": "c-1",
        "orderType": "General",
        "status": status,
        "items": [line_item_json("p-1", 2)],
        "subtotal": "20.00",
        "discount": "0.00",
        "tax": "2.00",
        "total": "22.00",
        "notes": null,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-01T09:00:00Z"
    })
}

pub fn product_json(id: &str, price: Value) -> Value {
    json!({
        "id": id,
        "sku": format!("SKU-{}", id),
        "name": format!("Product {}", id),
        "description": null,
        "type": "finished_good",
        "categoryId": null,
        "price": price,
        "cost": "4.00",
        "uom": "pcs",
        "reorderLevel": 10,
        "colorIds": [],
        "isHaveLid": false,
        "supplierId": null,
        "active": true,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-01T09:00:00Z"
    })
}
