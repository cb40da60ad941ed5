use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use binlight_api::{AppState, build_app};
use binlight_storage::InMemoryInventory;
use binlight_wled::{LedTransport, TransportError, WledState};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct FakeTransport {
    sent: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

#[async_trait::async_trait]
impl LedTransport for FakeTransport {
    async fn send_command(&self, address: &str, _state: &WledState) -> Result<(), TransportError> {
        self.sent.lock().expect("lock").push(address.to_string());
        if self.failing.contains(address) {
            return Err(TransportError::HttpStatus(500));
        }
        Ok(())
    }

    async fn ping(&self, address: &str) -> bool {
        !self.failing.contains(address)
    }
}

fn app_with(transport: FakeTransport) -> Router {
    let state = AppState::new(Arc::new(InMemoryInventory::new()), Arc::new(transport));
    build_app(state)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json")
    };
    (status, value)
}

async fn create_controller(app: &Router, name: &str, ip: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/controllers",
        Some(json!({ "name": name, "ipAddress": ip })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["controllerId"].as_str().expect("id").to_string()
}

async fn create_bin(app: &Router, name: &str, controller_id: &str, led_index: i32) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/bins",
        Some(json!({
            "name": name,
            "controllerId": controller_id,
            "segmentId": 0,
            "ledIndex": led_index
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["binId"].as_str().expect("id").to_string()
}

async fn create_part(app: &Router, name: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/parts",
        Some(json!({
            "name": name,
            "minStock": 5,
            "reorderPoint": 10,
            "stockTrackingEnabled": true,
            "categories": ["resistors", " resistors ", ""]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["categories"], json!(["resistors"]));
    body["data"]["partId"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn health_is_served_under_both_prefixes_with_request_ids() {
    let app = app_with(FakeTransport::default());
    for uri in ["/health", "/api/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("x-trace-id"));
    }
}

#[tokio::test]
async fn controller_conflicts_map_to_409() {
    let app = app_with(FakeTransport::default());
    let controller_id = create_controller(&app, "Rack A", "10.0.0.1").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/controllers",
        Some(json!({ "name": "Rack B", "ipAddress": "10.0.0.1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE.CONFLICT");

    create_bin(&app, "A1", &controller_id, 0).await;
    let (status, _) = call(&app, "DELETE", &format!("/controllers/{controller_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, "GET", "/controllers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["binCount"], 1);
    assert_eq!(body["data"][0]["status"], "unknown");
}

#[tokio::test]
async fn invalid_requests_are_rejected_with_400() {
    let app = app_with(FakeTransport::default());
    let (status, body) = call(
        &app,
        "POST",
        "/controllers",
        Some(json!({ "name": "  ", "ipAddress": "10.0.0.1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID.REQUEST");

    let (status, _) = call(
        &app,
        "POST",
        "/bins",
        Some(json!({ "name": "A1", "controllerId": "missing", "ledIndex": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "GET", "/controllers/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_and_migrate_controllers() {
    let app = app_with(FakeTransport::default());
    let from = create_controller(&app, "Rack A", "10.0.0.1").await;
    let to = create_controller(&app, "Rack B", "10.0.0.2").await;
    create_bin(&app, "A1", &from, 0).await;
    create_bin(&app, "A2", &from, 1).await;

    let (status, body) = call(&app, "POST", &format!("/controllers/{from}/refresh"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "online");
    assert!(body["data"]["lastSeenAtMs"].is_i64());

    let (status, body) = call(
        &app,
        "POST",
        &format!("/controllers/{from}/migrate"),
        Some(json!({ "targetControllerId": to })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["moved"], 2);

    let (status, _) = call(
        &app,
        "POST",
        &format!("/controllers/{to}/migrate"),
        Some(json!({ "targetControllerId": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &format!("/controllers/{from}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bulk_bins_and_overlap_flags() {
    let app = app_with(FakeTransport::default());
    let controller_id = create_controller(&app, "Rack A", "10.0.0.1").await;
    let (status, body) = call(
        &app,
        "POST",
        "/bins/bulk",
        Some(json!({ "controllerId": controller_id, "count": 3, "prefix": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["A0", "A1", "A2"]);

    // 与 A1 共用同一颗 LED
    create_bin(&app, "B1", &controller_id, 1).await;
    let (_, body) = call(&app, "GET", "/bins", None).await;
    let overlapping: Vec<&str> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .filter(|item| item["hasOverlap"] == true)
        .map(|item| item["name"].as_str().expect("name"))
        .collect();
    assert_eq!(overlapping.len(), 2);
    assert!(overlapping.contains(&"A1"));
    assert!(overlapping.contains(&"B1"));

    let (status, _) = call(
        &app,
        "POST",
        "/bins/bulk",
        Some(json!({ "controllerId": controller_id, "count": 2, "prefix": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn locate_reports_started_and_stopped() {
    let app = app_with(FakeTransport {
        failing: ["10.0.0.2".to_string()].into_iter().collect(),
        ..FakeTransport::default()
    });
    let healthy = create_controller(&app, "Rack A", "10.0.0.1").await;
    let broken = create_controller(&app, "Rack B", "10.0.0.2").await;
    let bin_a = create_bin(&app, "A1", &healthy, 0).await;
    let bin_b = create_bin(&app, "B1", &broken, 0).await;
    let part_a = create_part(&app, "10k resistor").await;
    let part_b = create_part(&app, "1k resistor").await;

    for (part_id, bin_id) in [(&part_a, &bin_a), (&part_b, &bin_b)] {
        let (status, body) = call(
            &app,
            "POST",
            "/locations",
            Some(json!({ "partId": part_id, "binId": bin_id, "quantity": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (status, body) = call(&app, "POST", &format!("/locate/parts/{part_a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "started");
    assert_eq!(body["data"]["dispatch"]["leds"], 1);

    let (status, body) = call(&app, "POST", &format!("/locate/parts/{part_b}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "stopped");
    assert_eq!(body["data"]["dispatch"]["failed"][0]["ipAddress"], "10.0.0.2");

    let (_, body) = call(&app, "POST", "/locate/stop-all", None).await;
    assert_eq!(body["data"]["state"], "stopped");
    assert_eq!(body["data"]["resetAll"], true);
    assert_eq!(body["data"]["dispatch"]["leds"], 2);

    let (_, body) = call(&app, "GET", &format!("/locate/parts/{part_a}"), None).await;
    assert_eq!(body["data"]["state"], "stopped");
}

#[tokio::test]
async fn stock_status_defaults_to_all_and_bad_references_are_400() {
    let app = app_with(FakeTransport::default());
    let controller_id = create_controller(&app, "Rack A", "10.0.0.1").await;
    let bin_id = create_bin(&app, "A1", &controller_id, 0).await;
    let part_id = create_part(&app, "LED 5mm").await;

    let (status, _) = call(
        &app,
        "POST",
        "/locations",
        Some(json!({ "partId": part_id, "binId": "missing", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        "POST",
        "/locations",
        Some(json!({ "partId": part_id, "binId": bin_id, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let location_id = body["data"]["locationId"].as_str().expect("id").to_string();

    let (status, body) = call(&app, "POST", "/stock-status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["filter"], "all");
    assert_eq!(body["data"]["litCount"], 1);
    assert_eq!(body["data"]["message"], "Lit 1 bins");

    let (status, body) = call(
        &app,
        "POST",
        "/stock-status",
        Some(json!({ "level": "attention" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["litCount"], 1);

    // 仍有库位的料格不能删除
    let (status, _) = call(&app, "DELETE", &format!("/bins/{bin_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/locations/{location_id}"),
        Some(json!({ "quantity": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call(
        &app,
        "POST",
        "/stock-status",
        Some(json!({ "level": "critical" })),
    )
    .await;
    assert_eq!(body["data"]["litCount"], 0);
}

#[tokio::test]
async fn cleanup_and_metrics_endpoints() {
    let app = app_with(FakeTransport::default());
    create_part(&app, "M3 screw").await;
    let (status, body) = call(&app, "POST", "/categories/cleanup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 0);

    let (status, body) = call(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["cleanupRuns"].as_u64().expect("counter") >= 1);
}
