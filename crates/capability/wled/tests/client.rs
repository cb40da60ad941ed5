use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use binlight_wled::{LedTransport, TransportError, WledClient, WledSegment, WledState};
use domain::Color;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

type Received = Arc<Mutex<Vec<Value>>>;

async fn record_state(State(received): State<Received>, Json(body): Json<Value>) -> StatusCode {
    received.lock().await.push(body);
    StatusCode::OK
}

async fn info() -> Json<Value> {
    Json(json!({ "ver": "0.14.0", "leds": { "count": 30 } }))
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr.to_string()
}

fn client() -> WledClient {
    WledClient::new(Duration::from_millis(500), Duration::from_millis(500)).expect("client")
}

#[tokio::test]
async fn send_command_posts_flat_segment_payload() {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/json/state", post(record_state))
        .with_state(received.clone());
    let address = spawn_server(app).await;

    let state = WledState::new(vec![
        WledSegment::new(0, vec![(5, Color::CRITICAL), (6, Color::ATTENTION)]),
        WledSegment::new(1, vec![(0, Color::OFF)]),
    ]);
    client()
        .send_command(&address, &state)
        .await
        .expect("send");

    let bodies = received.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "seg": [
                { "id": 0, "on": true, "i": [5, "FF0000", 6, "FFFF00"] },
                { "id": 1, "on": true, "i": [0, "000000"] }
            ]
        })
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new().route(
        "/json/state",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let address = spawn_server(app).await;
    let state = WledState::new(vec![WledSegment::new(0, vec![(1, Color::OK)])]);
    let err = client()
        .send_command(&address, &state)
        .await
        .expect_err("500");
    assert!(matches!(err, TransportError::HttpStatus(500)));
}

#[tokio::test]
async fn empty_state_is_rejected_before_sending() {
    let err = client()
        .send_command("127.0.0.1:9", &WledState::default())
        .await
        .expect_err("empty");
    assert!(matches!(err, TransportError::Payload(_)));
}

#[tokio::test]
async fn slow_controller_times_out() {
    let app = Router::new().route(
        "/json/state",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            StatusCode::OK
        }),
    );
    let address = spawn_server(app).await;
    let state = WledState::new(vec![WledSegment::new(0, vec![(1, Color::OK)])]);
    let err = client()
        .send_command(&address, &state)
        .await
        .expect_err("timeout");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn ping_is_true_only_for_http_200() {
    let online = spawn_server(Router::new().route("/json/info", get(info))).await;
    let unhealthy = spawn_server(Router::new().route(
        "/json/info",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;

    let client = client();
    assert!(client.ping(&online).await);
    assert!(!client.ping(&unhealthy).await);

    // 绑定后立即释放的端口，连接会被拒绝
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").to_string()
    };
    assert!(!client.ping(&closed).await);
}
