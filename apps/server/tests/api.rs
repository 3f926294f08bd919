use std::{collections::HashMap, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use pacfolio_server::{api::app_router, build_state, config::Config};

async fn build_test_router(extra: &[(&str, &str)]) -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let ledger = tmp.path().join("ledger.csv");

    let mut vars: HashMap<String, String> = HashMap::from([
        ("PAC_LEDGER_PATH".to_string(), ledger.to_string_lossy().to_string()),
        ("PAC_PRICE_PROVIDER".to_string(), "manual".to_string()),
        (
            "PAC_MANUAL_PRICES".to_string(),
            "SWDA.L=100,SPY5L.MI=12.5".to_string(),
        ),
        ("PAC_PRICE_CACHE_TTL_SECS".to_string(), "0".to_string()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn purchase(date: &str, instrument: &str, amount: f64, quantity: f64) -> Value {
    json!({
        "date": date,
        "instrument": instrument,
        "investedAmount": amount,
        "purchasePrice": amount / quantity,
        "quantity": quantity,
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _tmp) = build_test_router(&[]).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, spec) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/api/v1/report"].is_object());
}

#[tokio::test]
async fn empty_ledger_report_is_all_zero() {
    let (app, _tmp) = build_test_router(&[]).await;
    let (status, report) = send(&app, Method::GET, "/api/v1/report", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalInvested"].as_f64(), Some(0.0));
    assert_eq!(report["totalCurrentValue"].as_f64(), Some(0.0));
    assert_eq!(report["profitPct"].as_f64(), Some(0.0));
    assert_eq!(report["allocation"], json!([]));
    assert_eq!(report["cumulativeSeries"], json!([]));
    assert_eq!(report["progress"].as_array().unwrap().len(), 3);
    assert_eq!(report["allocationBasis"], "current_value");
}

#[tokio::test]
async fn posted_transactions_show_up_in_report() {
    let (app, _tmp) = build_test_router(&[("PAC_BUCKET", "month")]).await;

    let (status, stored) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "SWDA.L", 1000.0, 10.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["instrument"], "SWDA.L");
    assert_eq!(stored["date"], "2024-01-15");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-02-15", "SPY5L", 100.0, 10.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, report) = send(&app, Method::GET, "/api/v1/report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalInvested"].as_f64(), Some(1100.0));
    // 10 * 100 + 10 * 12.5
    assert_eq!(report["totalCurrentValue"].as_f64(), Some(1125.0));
    let series = report["cumulativeSeries"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["label"], "2024-01");
    assert_eq!(series[1]["invested"].as_f64(), Some(1100.0));

    let (_, listed) = send(&app, Method::GET, "/api/v1/transactions", None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["date"], "2024-02-15");
}

#[tokio::test]
async fn report_query_overrides_basis() {
    let (app, _tmp) = build_test_router(&[]).await;
    send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "NSQE.DE", 500.0, 5.0)),
    )
    .await;

    // NSQE.DE has no manual price: valued at 0 but still invested
    let (status, report) = send(&app, Method::GET, "/api/v1/report?basis=invested&bucket=year", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["allocationBasis"], "invested");
    assert_eq!(report["allocation"][0]["percentage"].as_f64(), Some(100.0));
    assert_eq!(report["cumulativeSeries"][0]["label"], "2024");
    assert_eq!(report["profitPct"].as_f64(), Some(-100.0));

    let (status, body) = send(&app, Method::GET, "/api/v1/report?bucket=week", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn invalid_transactions_are_rejected() {
    let (app, _tmp) = build_test_router(&[]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "VWCE", 100.0, 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("VWCE"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "SWDA.L", -100.0, 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "SWDA.L", 100.0, 1e27)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("quantity"));

    let (_, listed) = send(&app, Method::GET, "/api/v1/transactions", None).await;
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, Method::GET, "/api/v1/report", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn report_stream_sends_report_events() {
    let (app, _tmp) = build_test_router(&[]).await;
    send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(purchase("2024-01-15", "SWDA.L", 1000.0, 10.0)),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/events/report?refreshSecs=1&basis=invested")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let mut frames = response.into_body().into_data_stream();
    let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("first report event within the refresh period")
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();
    assert!(text.starts_with("event: report\n"), "unexpected frame: {}", text);

    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let report: Value = serde_json::from_str(data).unwrap();
    assert_eq!(report["totalInvested"].as_f64(), Some(1000.0));
    assert_eq!(report["totalCurrentValue"].as_f64(), Some(1000.0));
    assert_eq!(report["allocationBasis"], "invested");
}

#[tokio::test]
async fn report_stream_rejects_unknown_bucket() {
    let (app, _tmp) = build_test_router(&[]).await;
    let (status, body) = send(&app, Method::GET, "/api/v1/events/report?bucket=week", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn catalogue_prices_and_goals_are_listed() {
    let (app, _tmp) = build_test_router(&[("PAC_TARGETS", "1000,2000")]).await;

    let (_, instruments) = send(&app, Method::GET, "/api/v1/instruments", None).await;
    assert_eq!(instruments[0], json!({ "id": "SPY5L", "symbol": "SPY5L.MI" }));

    let (_, prices) = send(&app, Method::GET, "/api/v1/prices", None).await;
    let prices = prices.as_array().unwrap();
    assert_eq!(prices.len(), 3);
    assert_eq!(prices[0]["price"].as_f64(), Some(12.5));
    assert_eq!(prices[1]["price"].as_f64(), Some(100.0));
    assert_eq!(prices[2]["price"].as_f64(), Some(0.0));

    let (_, goals) = send(&app, Method::GET, "/api/v1/goals", None).await;
    let goals = goals.as_array().unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[1]["targetAmount"].as_f64(), Some(2000.0));
}
