//! End-to-end session scenarios over the warp test WebSocket client.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use warp::test::WsClient;

use clipsync::infrastructure::connection::ConnectionRegistry;
use clipsync::infrastructure::sync::ClipboardBroadcaster;
use clipsync::infrastructure::web::{handlers::WebSocketHandler, websocket_route};
use clipsync::interface::ConnectionStatus;

use common::{MemoryClipboard, RecordingStatusSink};

struct Harness {
    registry: ConnectionRegistry,
    clipboard: Arc<MemoryClipboard>,
    broadcaster: Arc<ClipboardBroadcaster>,
    status_sink: Arc<RecordingStatusSink>,
    handler: Arc<WebSocketHandler>,
}

fn harness() -> Harness {
    let registry = ConnectionRegistry::new();
    let clipboard = Arc::new(MemoryClipboard::new());
    let broadcaster = Arc::new(ClipboardBroadcaster::new(
        registry.clone(),
        clipboard.clone(),
    ));
    let status_sink = Arc::new(RecordingStatusSink::new());
    let handler = Arc::new(WebSocketHandler::new(
        registry.clone(),
        broadcaster.clone(),
        status_sink.clone(),
    ));

    Harness {
        registry,
        clipboard,
        broadcaster,
        status_sink,
        handler,
    }
}

impl Harness {
    async fn connect(&self, device_id: &str) -> WsClient {
        let client = warp::test::ws()
            .path(&format!("/ws/{}", device_id))
            .handshake(websocket_route(self.handler.clone()))
            .await
            .expect("websocket handshake failed");
        // Registration happens on the session task shortly after the
        // upgrade completes.
        wait_until(|| async { self.registry.get(device_id).await.is_some() }).await;
        client
    }
}

async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not met within 2s");
}

async fn recv_json(client: &mut WsClient) -> serde_json::Value {
    let message = timeout(Duration::from_secs(2), client.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("connection closed");
    serde_json::from_str(message.to_str().expect("text frame")).expect("json frame")
}

async fn assert_silent(client: &mut WsClient) {
    let result = timeout(Duration::from_millis(300), client.recv()).await;
    assert!(result.is_err(), "expected no frame, got one");
}

#[tokio::test]
async fn clipboard_update_reaches_other_peer_and_is_acked() {
    let harness = harness();
    let mut a = harness.connect("d1").await;
    let mut b = harness.connect("d2").await;

    a.send_text(r#"{"type":"clipboard_update","text":"hello"}"#)
        .await;

    let ack = recv_json(&mut a).await;
    assert_eq!(ack["status"], "success");
    assert_eq!(ack["message"], "Clipboard updated");

    let update = recv_json(&mut b).await;
    assert_eq!(update["type"], "clipboard_update");
    assert_eq!(update["text"], "hello");
    assert_eq!(update["source"], "d1");

    assert_eq!(harness.broadcaster.last_value().await, "hello");
    assert_eq!(harness.clipboard.content(), "hello");
}

#[tokio::test]
async fn duplicate_update_is_acked_but_not_rebroadcast() {
    let harness = harness();
    let mut a = harness.connect("d1").await;
    let mut b = harness.connect("d2").await;

    a.send_text(r#"{"type":"clipboard_update","text":"hello"}"#)
        .await;
    recv_json(&mut a).await;
    recv_json(&mut b).await;

    a.send_text(r#"{"type":"clipboard_update","text":"hello"}"#)
        .await;
    let ack = recv_json(&mut a).await;
    assert_eq!(ack["status"], "success");
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn pairing_request_gets_success_response() {
    let harness = harness();
    let mut a = harness.connect("d1").await;

    a.send_text(r#"{"type":"pairing_request"}"#).await;

    let response = recv_json(&mut a).await;
    assert_eq!(response["type"], "pairing_response");
    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "Pairing successful");

    // Pairing never touches clipboard state.
    assert_eq!(harness.broadcaster.last_value().await, "");
}

#[tokio::test]
async fn raw_text_payload_is_applied_without_ack() {
    let harness = harness();
    let mut a = harness.connect("d1").await;
    let mut b = harness.connect("d2").await;

    a.send_text("copied outside any envelope").await;

    let update = recv_json(&mut b).await;
    assert_eq!(update["text"], "copied outside any envelope");
    assert_eq!(update["source"], "d1");
    assert_eq!(harness.clipboard.content(), "copied outside any envelope");
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn bare_text_field_is_applied_without_ack() {
    let harness = harness();
    let mut a = harness.connect("d1").await;
    let mut b = harness.connect("d2").await;

    a.send_text(r#"{"text":"no envelope"}"#).await;

    let update = recv_json(&mut b).await;
    assert_eq!(update["text"], "no envelope");
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn unusable_json_is_ignored_and_session_stays_up() {
    let harness = harness();
    let mut a = harness.connect("d1").await;

    a.send_text("42").await;
    assert_silent(&mut a).await;
    assert_eq!(harness.broadcaster.last_value().await, "");

    // The session is still alive and serving.
    a.send_text(r#"{"type":"clipboard_update","text":"still here"}"#)
        .await;
    let ack = recv_json(&mut a).await;
    assert_eq!(ack["status"], "success");
}

#[tokio::test]
async fn reconnect_with_same_id_replaces_old_connection() {
    let harness = harness();
    let mut first = harness.connect("d1").await;
    let mut second = harness.connect("d1").await;

    // Registering the second connection closes the first.
    first
        .recv_closed()
        .await
        .expect("old connection should be closed");
    wait_until(|| async { harness.registry.count().await == 1 }).await;

    // The replacement serves traffic as usual.
    second
        .send_text(r#"{"type":"clipboard_update","text":"fresh"}"#)
        .await;
    let ack = recv_json(&mut second).await;
    assert_eq!(ack["status"], "success");
    assert_eq!(harness.broadcaster.last_value().await, "fresh");
}

#[tokio::test]
async fn replaced_session_ignores_frames_on_the_old_connection() {
    let harness = harness();
    let mut first = harness.connect("d1").await;
    let mut second = harness.connect("d1").await;

    // The replacement is registered once its Connected notification lands.
    wait_until(|| async {
        harness
            .status_sink
            .events()
            .iter()
            .filter(|(prefix, status)| prefix == "d1" && *status == ConnectionStatus::Connected)
            .count()
            == 2
    })
    .await;

    // The old client has not read the close frame yet; a frame it sends
    // now must not be dispatched under its id.
    first
        .send_text(r#"{"type":"clipboard_update","text":"stale"}"#)
        .await;

    wait_until(|| async {
        harness
            .status_sink
            .contains("d1", ConnectionStatus::Disconnected)
    })
    .await;
    assert_eq!(harness.broadcaster.last_value().await, "");
    assert_silent(&mut second).await;
}

#[tokio::test]
async fn status_sink_sees_connect_and_disconnect() {
    let harness = harness();
    let client = harness.connect("device-9876-abcd").await;

    wait_until(|| async {
        harness
            .status_sink
            .contains("device-9", ConnectionStatus::Connected)
    })
    .await;

    drop(client);
    wait_until(|| async {
        harness
            .status_sink
            .contains("device-9", ConnectionStatus::Disconnected)
    })
    .await;
    assert_eq!(harness.registry.count().await, 0);
}
