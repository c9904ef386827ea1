//! Integration tests for the API client against a wiremock stand-in for
//! the external ERP API.

mod common;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atlas_client::{ApiClient, ApiError};
use atlas_core::Money;

use common::{authed_client, product_json, sales_order_json, TEST_TOKEN};

#[tokio::test]
async fn login_attaches_bearer_token_to_requests() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    assert!(api.session().is_authenticated().await);

    // the list call must carry the token from the login response
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json("p-1", json!("12.50"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = api.products().list().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, Money::from_cents(1250));
}

#[tokio::test]
async fn money_decodes_leniently_from_the_wire() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p-str", json!("12.50")),
            product_json("p-num", json!(9.99)),
            product_json("p-bad", json!("not-a-price")),
        ])))
        .mount(&server)
        .await;

    let products = api.products().list().await.unwrap();
    assert_eq!(products[0].price, Money::from_cents(1250));
    assert_eq!(products[1].price, Money::from_cents(999));
    // garbage parses as zero - never NaN, never a failed fetch
    assert_eq!(products[2].price, Money::zero());
}

#[tokio::test]
async fn unauthorized_response_forces_logout() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;
    assert!(api.session().is_authenticated().await);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api.products().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Auth));
    // the session is gone: the only recovery is signing in again
    assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn server_rejection_surfaces_its_message() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/sales-orders/so-1/approve"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "SalesOrder is Confirmed, cannot approve"
        })))
        .mount(&server)
        .await;

    let err = api.sales_orders().approve("so-1").await.unwrap_err();
    match err {
        ApiError::Conflict(message) => {
            assert_eq!(message, "SalesOrder is Confirmed, cannot approve")
        }
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn transition_endpoint_returns_the_updated_document() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/sales-orders/so-1/approve"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sales_order_json("so-1", "Confirmed")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let order = api.sales_orders().approve("so-1").await.unwrap();
    assert_eq!(order.status, atlas_core::SalesOrderStatus::Confirmed);
    assert_eq!(order.total, Money::from_cents(2200));
}

#[tokio::test]
async fn transport_failure_is_surfaced_with_unknown_outcome() {
    // nothing is listening here
    let api = ApiClient::new("http://127.0.0.1:9");

    let err = api.products().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn invalid_payload_never_reaches_the_network() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    // no /stock-movements mock mounted: a network call would 404 loudly
    let bad = atlas_core::MovementDraft {
        product_id: "p-1".to_string(),
        kind: atlas_core::MovementKind::In,
        quantity: 0,
        reference: "ADJ-1".to_string(),
        reason: None,
    };
    let err = api.stock_movements().create(&bad).await.unwrap_err();
    assert!(matches!(err, ApiError::Core(_)));
}

#[tokio::test]
async fn status_casing_from_the_wire_is_normalized() {
    let server = MockServer::start().await;
    let api = authed_client(&server).await;

    let mut order = sales_order_json("so-9", "Draft");
    order["status"] = json!("confirmed"); // lowercase on the wire

    Mock::given(method("GET"))
        .and(path("/sales-orders/so-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order))
        .mount(&server)
        .await;

    let order = api.sales_orders().get("so-9").await.unwrap();
    assert_eq!(order.status, atlas_core::SalesOrderStatus::Confirmed);
}
