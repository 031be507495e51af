use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::Receiver;
use tower::ServiceExt;
use uuid::Uuid;
use pressroom_api::{app, AppState};
use pressroom_catalog::{CostConfig, ItemOption, OptionCatalog, SizeVariant};
use pressroom_order::{pricing_tiers, PackagingConfig, Quoter};
use pressroom_shared::models::CatalogEvent;
use pressroom_store::InMemoryStore;

fn test_state() -> AppState {
    let options = OptionCatalog::new(
        vec![
            ItemOption::new("paper-matte", "Paper Matte", 1.0),
            ItemOption::new("vinyl", "Vinyl", 1.3),
        ],
        vec![
            ItemOption::new("none", "None", 1.0),
            ItemOption::new("gloss", "Gloss", 1.15),
        ],
    )
    .unwrap();

    let store = Arc::new(InMemoryStore::new());
    AppState::new(
        store.clone(),
        store,
        options,
        CostConfig::default(),
        PackagingConfig::default(),
    )
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn variant_request(width: f64, height: f64) -> Value {
    json!({
        "material_id": "vinyl",
        "finish_id": "gloss",
        "width": width,
        "height": height,
        "tiers": [
            { "min": 1, "max": 99 },
            { "min": 100, "max": 499, "discount": 10.0 },
            { "min": 500, "max": 999, "competitor_price": 4.0 }
        ]
    })
}

async fn publish_variant(router: &Router, product_id: Uuid) -> SizeVariant {
    let (status, body) = send(
        router,
        Method::POST,
        &format!("/v1/admin/products/{}/variants", product_id),
        Some(variant_request(10.0, 10.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body["variant"].clone()).unwrap()
}

fn drain(rx: &mut Receiver<CatalogEvent>) -> Vec<CatalogEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_quote_with_default_table() {
    let router = app(test_state());

    let (status, body) = send(&router, Method::POST, "/v1/quotes", Some(json!({ "quantity": 150 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit_price"], json!(8.0));
    assert_eq!(body["subtotal"], json!(1200.0));
    assert_eq!(body["packaging_cost"], json!(100.0));
    assert_eq!(body["final_price"], json!(1300.0));
}

#[tokio::test]
async fn test_quote_rejects_zero_quantity() {
    let router = app(test_state());

    let (status, body) = send(&router, Method::POST, "/v1/quotes", Some(json!({ "quantity": 0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_quote_rejects_malformed_client_tiers() {
    let router = app(test_state());

    let negative = json!({
        "quantity": 10,
        "tiers": [{ "min_qty": 1, "max_qty": 99, "price_per_unit": -20.0 }]
    });
    let (status, body) = send(&router, Method::POST, "/v1/quotes", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("tier 0"));

    let overlapping = json!({
        "quantity": 10,
        "tiers": [
            { "min_qty": 1, "max_qty": 50, "price_per_unit": 5.0 },
            { "min_qty": 20, "max_qty": 99, "price_per_unit": 4.0 }
        ]
    });
    let (status, _) = send(&router, Method::POST, "/v1/quotes", Some(overlapping)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let custom = json!({
        "quantity": 10,
        "tiers": [{ "min_qty": 1, "max_qty": null, "price_per_unit": 2.0 }]
    });
    let (status, body) = send(&router, Method::POST, "/v1/quotes", Some(custom)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["final_price"], json!(95.0));
}

#[tokio::test]
async fn test_generate_and_list_variants() {
    let state = test_state();
    let mut events = state.events.subscribe();
    let router = app(state);
    let product_id = Uuid::new_v4();

    let (status, report) = send(
        &router,
        Method::POST,
        &format!("/v1/admin/products/{}/variants", product_id),
        Some(variant_request(10.0, 10.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["variant"]["name"], json!("10x10"));
    assert_eq!(report["variant"]["tiers"].as_array().unwrap().len(), 3);
    assert_eq!(report["breakdown"].as_array().unwrap().len(), 3);

    let (status, listed) = send(
        &router,
        Method::GET,
        &format!("/v1/products/{}/variants", product_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let variant_id = report["variant"]["id"].as_str().unwrap();
    let (status, fetched) = send(
        &router,
        Method::GET,
        &format!("/v1/products/{}/variants/{}", product_id, variant_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, report["variant"]);

    let published = drain(&mut events);
    assert!(matches!(
        published.as_slice(),
        [CatalogEvent::VariantPublished(event)] if event.name == "10x10" && event.tier_count == 3
    ));
}

#[tokio::test]
async fn test_generate_rejects_bad_authoring_input() {
    let router = app(test_state());
    let uri = format!("/v1/admin/products/{}/variants", Uuid::new_v4());

    let mut overlapping = variant_request(10.0, 10.0);
    overlapping["tiers"] = json!([{ "min": 1, "max": 100 }, { "min": 50, "max": 200 }]);
    let (status, _) = send(&router, Method::POST, &uri, Some(overlapping)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown_material = variant_request(10.0, 10.0);
    unknown_material["material_id"] = json!("gold-leaf");
    let (status, body) = send(&router, Method::POST, &uri, Some(unknown_material)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("gold-leaf"));
}

#[tokio::test]
async fn test_generate_range_skips_existing_sizes() {
    let router = app(test_state());
    let product_id = Uuid::new_v4();
    publish_variant(&router, product_id).await;

    let mut range = variant_request(0.0, 0.0);
    range["min_size"] = json!(9);
    range["max_size"] = json!(11);
    let (status, outcome) = send(
        &router,
        Method::POST,
        &format!("/v1/admin/products/{}/variants/range", product_id),
        Some(range.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["created"].as_array().unwrap().len(), 2);
    assert_eq!(outcome["skipped"], json!(["10x10"]));

    range["min_size"] = json!(1);
    range["max_size"] = json!(u32::MAX);
    let (status, _) = send(
        &router,
        Method::POST,
        &format!("/v1/admin/products/{}/variants/range", product_id),
        Some(range.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    range["min_size"] = json!(12);
    range["max_size"] = json!(11);
    let (status, _) = send(
        &router,
        Method::POST,
        &format!("/v1/admin/products/{}/variants/range", product_id),
        Some(range),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(
        &router,
        Method::GET,
        &format!("/v1/products/{}/variants", product_id),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_order_accepts_honest_claim() {
    let state = test_state();
    let router = app(state.clone());
    let product_id = Uuid::new_v4();
    let variant = publish_variant(&router, product_id).await;
    let mut events = state.events.subscribe();

    let trusted = pricing_tiers(&variant);
    let expected = Quoter::default().quote(150, Some(trusted.as_slice()));

    let (status, order) = send(
        &router,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "customer_id": "cust-1",
            "customer_email": "buyer@example.com",
            "product_id": product_id,
            "variant_id": variant.id,
            "quantity": 150,
            "claimed_final_price": expected.final_price + 0.5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], json!("PROPOSED"));
    assert_eq!(order["total"], json!(expected.final_price));
    assert_eq!(order["items"][0]["variant_name"], json!("10x10"));

    let emitted = drain(&mut events);
    assert!(matches!(
        emitted.as_slice(),
        [CatalogEvent::OrderAccepted(event)] if event.quantity == 150 && event.variant_id == variant.id
    ));

    let order_id = order["id"].as_str().unwrap();
    let (status, fetched) = send(&router, Method::GET, &format!("/v1/orders/{}", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], order["id"]);
}

#[tokio::test]
async fn test_order_rejects_tampered_claim() {
    let state = test_state();
    let router = app(state.clone());
    let product_id = Uuid::new_v4();
    let variant = publish_variant(&router, product_id).await;
    let mut events = state.events.subscribe();

    let (status, body) = send(
        &router,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "customer_id": "cust-2",
            "product_id": product_id,
            "variant_id": variant.id,
            "quantity": 150,
            "claimed_final_price": 1.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("mismatch"));
    assert!(matches!(
        drain(&mut events).as_slice(),
        [CatalogEvent::PriceRejected(event)] if event.claimed_final_price == 1.0
    ));
}

#[tokio::test]
async fn test_order_rejects_unknown_variant() {
    let router = app(test_state());

    let (status, _) = send(
        &router,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "customer_id": "cust-3",
            "product_id": Uuid::new_v4(),
            "variant_id": Uuid::new_v4(),
            "quantity": 150,
            "claimed_final_price": 1300.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_order_lifecycle() {
    let router = app(test_state());
    let product_id = Uuid::new_v4();
    let variant = publish_variant(&router, product_id).await;
    let trusted = pricing_tiers(&variant);
    let claim = Quoter::default().quote(40, Some(trusted.as_slice())).final_price;

    let (_, order) = send(
        &router,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "customer_id": "cust-4",
            "product_id": product_id,
            "variant_id": variant.id,
            "quantity": 40,
            "claimed_final_price": claim
        })),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let (status, confirmed) = send(&router, Method::POST, &format!("/v1/orders/{}/confirm", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], json!("CONFIRMED"));

    let (status, cancelled) = send(&router, Method::POST, &format!("/v1/orders/{}/cancel", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], json!("CANCELLED"));

    let (status, _) = send(&router, Method::POST, &format!("/v1/orders/{}/confirm", order_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&router, Method::GET, &format!("/v1/orders/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_templates_round_trip() {
    let router = app(test_state());

    let (status, _) = send(&router, Method::GET, "/v1/admin/templates/stickers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let template = json!({
        "config": serde_json::to_value(CostConfig::default()).unwrap(),
        "material_id": "vinyl",
        "finish_id": "gloss",
        "tiers": [{ "min": 1, "max": 100 }, { "min": 50, "max": 200 }]
    });
    let (status, _) = send(&router, Method::PUT, "/v1/admin/templates/stickers", Some(template.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(&router, Method::GET, "/v1/admin/templates/stickers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["material_id"], json!("vinyl"));
    assert_eq!(fetched["tiers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_event_feed_streams_published_variants() {
    let router = app(test_state());

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/v1/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let variant = publish_variant(&router, Uuid::new_v4()).await;

    let mut body = response.into_body().into_data_stream();
    let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();

    assert!(text.contains("event: variant_published"));
    assert!(text.contains(&variant.id.to_string()));
}
