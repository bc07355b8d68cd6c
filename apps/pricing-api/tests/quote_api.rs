//! Black-box tests for the quote service and its client.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use printshop_core::estimate::QuoteSource;
use printshop_core::pricing::{LABEL_BASE, LABEL_EXTRA_PLACEMENTS, LABEL_INSIDE_LABEL, LABEL_SHIPPING_ESTIMATED};
use printshop_core::{calculate_price, ChargeInput, FeeSchedule, PriceBreakdown, PriceCalculationInput};
use pricing_api::{router, AppState, PricingApiConfig, QuoteClient};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with(PricingApiConfig::default())
}

fn app_with(config: PricingApiConfig) -> Router {
    router(Arc::new(AppState::new(config)))
}

async fn post_quote(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/pricing/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn labels(body: &Value) -> Vec<&str> {
    body["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["label"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn quote_single_plain_item() {
    let (status, body) = post_quote(app(), json!({ "basePrice": 40, "quantity": 1 }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["subtotal"], 40.0);
    assert_eq!(body["discounts"], 0.0);
    assert_eq!(body["total"], 40.0);
    assert_eq!(body["isEstimate"], false);
    assert_eq!(labels(&body), vec![LABEL_BASE]);
}

#[tokio::test]
async fn quote_with_customizations() {
    let input = json!({
        "basePrice": 40,
        "quantity": 2,
        "extraPlacements": 1,
        "hasInsideLabel": true,
    });
    let (status, body) = post_quote(app(), input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], 90.0);
    assert_eq!(
        labels(&body),
        vec![LABEL_BASE, LABEL_EXTRA_PLACEMENTS, LABEL_INSIDE_LABEL]
    );
    // base line carries no note; fee lines do
    assert!(body["lines"][0].get("note").is_none());
    assert!(body["lines"][1]["note"].is_string());
}

#[tokio::test]
async fn quote_marks_estimated_charges() {
    let input = json!({
        "basePrice": 50,
        "shipping": { "amount": 5, "isEstimated": true },
        "tax": { "amount": 4, "isEstimated": false },
    });
    let (status, body) = post_quote(app(), input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 59.0);
    assert_eq!(body["isEstimate"], true);
    assert!(labels(&body).contains(&LABEL_SHIPPING_ESTIMATED));
}

#[tokio::test]
async fn quote_echoes_currency() {
    let (_, body) = post_quote(app(), json!({ "currency": "EUR", "basePrice": 10 }).to_string()).await;
    assert_eq!(body["currency"], "EUR");
}

#[tokio::test]
async fn empty_object_prices_to_zero() {
    let (status, body) = post_quote(app(), "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0.0);
    assert_eq!(body["currency"], "USD");
}

#[tokio::test]
async fn malformed_fields_are_coerced() {
    let input = json!({
        "basePrice": "12.50",
        "quantity": 2.7,
        "hasInsideLabel": "yes",
        "membershipDiscountRate": 7,
        "shipping": "free",
    });
    let (status, body) = post_quote(app(), input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    // quantity truncates to 2; the rate clamps to 100%
    assert_eq!(body["discounts"], 25.0);
    assert_eq!(body["subtotal"], 0.0);
    assert_eq!(body["shipping"], 0.0);
    assert!(!labels(&body).contains(&LABEL_INSIDE_LABEL));
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    for body in ["[]", "\"hello\"", "42", "null", "true"] {
        let (status, value) = post_quote(app(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(value["error"], "invalid_input");
        assert!(value["message"].as_str().unwrap().contains("must be a JSON object"));
    }
}

#[tokio::test]
async fn invalid_json_is_rejected() {
    let (status, value) = post_quote(app(), "{\"basePrice\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "malformed_json");
    assert!(value["message"].is_string());
}

#[tokio::test]
async fn missing_content_type_is_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/pricing/quote")
        .body(Body::from(r#"{"basePrice": 5}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = PricingApiConfig {
        body_limit_bytes: 16,
        ..PricingApiConfig::default()
    };
    let body = json!({ "basePrice": 40, "currency": "USD", "quantity": 12 }).to_string();

    let (status, value) = post_quote(app_with(config), body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(value["error"], "payload_too_large");
    assert!(value["message"].is_string());
}

#[tokio::test]
async fn out_of_range_numbers_are_coerced() {
    let (status, body) = post_quote(app(), r#"{"basePrice": 1e400, "quantity": 1}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0.0);

    let (status, body) = post_quote(app(), r#"{"basePrice": 40, "quantity": -1e999}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 40.0);
}

#[tokio::test]
async fn configured_fees_are_used() {
    let config = PricingApiConfig {
        fees: FeeSchedule {
            inside_label: 5.0,
            ..FeeSchedule::STANDARD
        },
        ..PricingApiConfig::default()
    };
    let input = json!({ "basePrice": 10, "hasInsideLabel": true });

    let (_, body) = post_quote(app_with(config), input.to_string()).await;
    assert_eq!(body["subtotal"], 15.0);
}

#[tokio::test]
async fn server_matches_in_process_calculation() {
    let input = PriceCalculationInput {
        currency: "EUR".to_string(),
        base_price: 19.99,
        quantity: 3,
        extra_placements: 2,
        has_outside_label: true,
        is_premium_image: true,
        is_embroidery: true,
        embroidery_digitization_fee_applicable: true,
        membership_discount_rate: 0.125,
        shipping: ChargeInput::estimated(6.49),
        tax: ChargeInput::confirmed(8.2),
        ..PriceCalculationInput::default()
    };

    let (status, body) = post_quote(app(), serde_json::to_string(&input).unwrap()).await;
    assert_eq!(status, StatusCode::OK);

    let served: PriceBreakdown = serde_json::from_value(body).unwrap();
    assert_eq!(served, calculate_price(&input));
}

#[tokio::test]
async fn health_is_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn client_prefers_server_quote() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // server charges more for inside labels than the client assumes
    let config = PricingApiConfig {
        fees: FeeSchedule {
            inside_label: 2.5,
            ..FeeSchedule::STANDARD
        },
        ..PricingApiConfig::default()
    };
    tokio::spawn(async move {
        axum::serve(listener, app_with(config)).await.unwrap();
    });

    let client = QuoteClient::new(&format!("http://{addr}")).unwrap();
    let input = PriceCalculationInput {
        base_price: 30.0,
        has_inside_label: true,
        ..PriceCalculationInput::default()
    };

    let served = client.quote(&input).await.unwrap();
    assert_eq!(served.subtotal, 32.5);

    let quote = client.quote_or_estimate(&input).await;
    assert_eq!(quote.source, QuoteSource::Server);
    assert!(quote.corrected);
    assert_eq!(quote.breakdown.total, 32.5);
}

#[tokio::test]
async fn client_falls_back_to_local_estimate() {
    // nothing listens on port 1
    let client = QuoteClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
    let input = PriceCalculationInput {
        base_price: 40.0,
        quantity: 2,
        extra_placements: 1,
        ..PriceCalculationInput::default()
    };

    assert!(client.quote(&input).await.is_err());

    let quote = client.quote_or_estimate(&input).await;
    assert_eq!(quote.source, QuoteSource::Local);
    assert!(!quote.corrected);
    assert_eq!(quote.breakdown, calculate_price(&input));
}
