//! Per-connection session handling.
//!
//! One task per accepted WebSocket: register the peer (evicting any prior
//! connection for the same device id), run the receive loop, and on any
//! exit path unregister and emit a Disconnected notification. A silent
//! peer keeps its handler parked on the next frame indefinitely; only an
//! explicit close or an I/O error ends the loop.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket};

use crate::infrastructure::connection::{ConnectionRegistry, PeerHandle};
use crate::infrastructure::sync::{BroadcastOrigin, ClipboardBroadcaster};
use crate::interface::{ConnectionStatus, StatusSink};
use crate::message::{parse_inbound, ClipboardMessage, InboundMessage, UpdateAck};
use crate::utils::helpers::short_id;

pub struct WebSocketHandler {
    registry: ConnectionRegistry,
    broadcaster: Arc<ClipboardBroadcaster>,
    status_sink: Arc<dyn StatusSink>,
}

impl WebSocketHandler {
    pub fn new(
        registry: ConnectionRegistry,
        broadcaster: Arc<ClipboardBroadcaster>,
        status_sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            status_sink,
        }
    }

    /// Drive one peer connection from accept to teardown.
    pub async fn client_connected(&self, ws: WebSocket, device_id: String) {
        let (mut ws_tx, mut ws_rx) = ws.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

        // Forward queued outbound frames to the socket. The queue decouples
        // broadcast senders from this socket's backpressure.
        let forward_device_id = device_id.clone();
        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let is_close = message.is_close();
                if let Err(e) = ws_tx.send(message).await {
                    debug!("Failed to forward frame to {}: {}", forward_device_id, e);
                    break;
                }
                if is_close {
                    break;
                }
            }
            let _ = ws_tx.close().await;
        });

        let handle = PeerHandle::new(device_id.clone(), tx);
        self.registry.register(handle.clone()).await;
        self.status_sink
            .notify(short_id(&device_id), ConnectionStatus::Connected);
        info!("Device {} connected via WebSocket", device_id);

        while let Some(result) = ws_rx.next().await {
            // A replaced connection may keep delivering frames until the
            // peer acknowledges the close; stop handling them under this id.
            if !handle.is_connected() {
                break;
            }
            let message = match result {
                Ok(message) => message,
                Err(e) => {
                    warn!("Error with device {}: {}", device_id, e);
                    break;
                }
            };
            if message.is_close() {
                break;
            }
            // Ping/pong and binary frames carry nothing for us.
            let Ok(text) = message.to_str() else {
                continue;
            };
            self.dispatch(text, &device_id, &handle).await;
        }

        // unregister_handle, not unregister: if this session was replaced
        // by a reconnect its teardown must leave the replacement alone.
        self.registry.unregister_handle(&device_id, &handle).await;
        handle.close();
        self.status_sink
            .notify(short_id(&device_id), ConnectionStatus::Disconnected);
        info!("Device {} disconnected", device_id);
    }

    async fn dispatch(&self, raw: &str, device_id: &str, handle: &PeerHandle) {
        match parse_inbound(raw) {
            InboundMessage::PairingRequest => {
                info!("Pairing request from {}", device_id);
                if let Err(e) = handle.send_json(&ClipboardMessage::pairing_success()) {
                    warn!("Failed to send pairing response to {}: {}", device_id, e);
                }
            }
            InboundMessage::ClipboardUpdate { text } => {
                self.broadcaster
                    .apply_and_broadcast(&text, &BroadcastOrigin::Peer(device_id.to_string()))
                    .await;
                // Acknowledge receipt even for duplicates.
                if let Err(e) = handle.send_json(&UpdateAck::success()) {
                    warn!("Failed to send ack to {}: {}", device_id, e);
                }
            }
            InboundMessage::FallbackText { text } => {
                self.broadcaster
                    .apply_and_broadcast(&text, &BroadcastOrigin::Peer(device_id.to_string()))
                    .await;
            }
            InboundMessage::Ignored => {
                debug!("Ignoring frame from {} with no usable content", device_id);
            }
        }
    }
}
