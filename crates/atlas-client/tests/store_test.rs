//! Integration tests for the EntityStore cache discipline: one cached
//! list per entity kind, invalidated after every mutating call.

mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atlas_client::{ApiError, EntityStore};
use atlas_core::{DeliveryOrder, DeliveryStatus, SalesOrderStatus};

use common::{authed_client, sales_order_json};

#[tokio::test]
async fn reads_are_cached_until_a_mutation() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    // exactly two list fetches: initial read + post-mutation refetch
    Mock::given(method("GET"))
        .and(path("/sales-orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([sales_order_json("so-1", "Draft")])),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sales-orders/so-1/approve"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sales_order_json("so-1", "Confirmed")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = EntityStore::new(api);

    // two reads, one fetch
    let first = store.sales_orders().await.unwrap();
    let again = store.sales_orders().await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(again.len(), 1);

    // a mutation invalidates the kind
    let draft_order = first[0].clone();
    let approved = store.approve_sales_order(&draft_order).await.unwrap();
    assert_eq!(approved.status, SalesOrderStatus::Confirmed);

    // next read refetches (second expected GET)
    let _ = store.sales_orders().await.unwrap();
}

#[tokio::test]
async fn illegal_transition_is_rejected_before_the_network() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    // deliberately NO approve endpoint mounted: a request would fail loudly
    Mock::given(method("GET"))
        .and(path("/sales-orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sales_order_json("so-2", "Confirmed")])),
        )
        .mount(&server)
        .await;

    let store = EntityStore::new(api);
    let confirmed = store.sales_orders().await.unwrap()[0].clone();

    let err = store.approve_sales_order(&confirmed).await.unwrap_err();
    match err {
        ApiError::Core(core) => {
            assert_eq!(core.to_string(), "SalesOrder is Confirmed, cannot approve")
        }
        other => panic!("expected Core error, got {:?}", other),
    }
}

#[tokio::test]
async fn deleting_an_approved_delivery_is_rejected() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;
    let store = EntityStore::new(api);

    let delivery: DeliveryOrder = serde_json::from_value(json!({
        "id": "do-1",
        "number": "DO-000001",
        "salesOrderId": "so-1",
        "customerId": "c-1",
        "orderType": "General",
        "status": "Approved",
        "items": [common::line_item_json("p-1", 2)],
        "deliveryDate": null,
        "notes": null,
        "createdAt": "2024-03-02T09:00:00Z",
        "updatedAt": "2024-03-02T09:00:00Z"
    }))
    .unwrap();
    assert_eq!(delivery.status, DeliveryStatus::Approved);

    // no DELETE mock mounted: the rejection must happen client-side
    let err = store.delete_delivery(&delivery).await.unwrap_err();
    match err {
        ApiError::Core(core) => {
            assert_eq!(core.to_string(), "DeliveryOrder is Approved, cannot delete")
        }
        other => panic!("expected Core error, got {:?}", other),
    }
}

#[tokio::test]
async fn low_stock_is_derived_from_the_movement_log() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    // reorderLevel is 10 in the fixture
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::product_json("p-low", json!("5.00")),
            common::product_json("p-fine", json!("5.00")),
        ])))
        .mount(&server)
        .await;

    let movement = |id: &str, product: &str, kind: &str, qty: i64| {
        json!({
            "id": id,
            "productId": product,
            "type": kind,
            "quantity": qty,
            "reference": "PO-1",
            "reason": null,
            "recordedBy": "amir",
            "recordedAt": "2024-03-01T10:00:00Z"
        })
    };

    Mock::given(method("GET"))
        .and(path("/stock-movements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            movement("m-1", "p-low", "in", 12),
            movement("m-2", "p-low", "out", 5),
            movement("m-3", "p-low", "adjustment", -3), // p-low ends at 4
            movement("m-4", "p-fine", "in", 40),
        ])))
        .mount(&server)
        .await;

    let store = EntityStore::new(api);
    let ledger = store.stock_ledger().await.unwrap();
    assert_eq!(ledger.current_stock("p-low"), Some(4));
    assert_eq!(ledger.current_stock("p-fine"), Some(40));

    let alerts = store.low_stock().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].product_id, "p-low");
    // 4 on hand against a reorder level of 10 is below half: critical
    assert_eq!(alerts[0].condition, atlas_core::StockCondition::Critical);
}

#[tokio::test]
async fn derived_delivery_copies_the_order_snapshot() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/sales-orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sales_order_json("so-3", "Confirmed")])),
        )
        .mount(&server)
        .await;

    // echo back a delivery derived from whatever was posted
    Mock::given(method("POST"))
        .and(path("/delivery-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "do-9",
            "number": "DO-000009",
            "salesOrderId": "so-3",
            "customerId": "c-1",
            "orderType": "General",
            "status": "Pending",
            "items": [common::line_item_json("p-1", 2)],
            "deliveryDate": null,
            "notes": null,
            "createdAt": "2024-03-02T09:00:00Z",
            "updatedAt": "2024-03-02T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = EntityStore::new(api);
    let order = store.sales_orders().await.unwrap()[0].clone();

    let delivery = store.create_delivery_from_order(&order).await.unwrap();
    assert_eq!(delivery.sales_order_id.as_deref(), Some("so-3"));
    assert_eq!(delivery.order_type, order.order_type);
    assert_eq!(delivery.items.len(), order.items.len());
}
