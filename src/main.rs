use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use uuid::Uuid;

use clipsync::config::Setting;
use clipsync::infrastructure::clipboard::SystemClipboard;
use clipsync::infrastructure::connection::ConnectionRegistry;
use clipsync::infrastructure::status::LogStatusSink;
use clipsync::infrastructure::sync::{ClipboardBroadcaster, ClipboardPoller};
use clipsync::infrastructure::web::{handlers::WebSocketHandler, run_webserver};
use clipsync::interface::LocalClipboardTrait;
use clipsync::utils::helpers::generate_pairing_code;
use clipsync::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut setting = Setting::load(None)?;
    setting.set_device_id(Uuid::new_v4().to_string());

    let pairing_code = generate_pairing_code();
    let hostname = gethostname::gethostname().to_string_lossy().into_owned();
    let ip_address = match local_ip_address::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            warn!("Error getting IP address: {}", e);
            "127.0.0.1".to_string()
        }
    };
    let port = setting.network.webserver_port;

    info!("Device ID: {}", setting.get_device_id());
    info!("Hostname: {}", hostname);
    info!("IP Address: {}", ip_address);
    info!("Pairing code: {}", pairing_code);
    info!(
        "Connect URL: ws://{}:{}/ws/<your-device-id>?code={}",
        ip_address, port, pairing_code
    );

    let clipboard: Arc<dyn LocalClipboardTrait> = Arc::new(SystemClipboard::new()?);
    let registry = ConnectionRegistry::new();
    let broadcaster = Arc::new(ClipboardBroadcaster::new(registry.clone(), clipboard.clone()));

    let poller_handle = if setting.sync.auto_sync {
        let poller = ClipboardPoller::new(
            clipboard,
            broadcaster.clone(),
            Duration::from_millis(setting.sync.poll_interval_ms),
        );
        Some(poller.start())
    } else {
        info!("Auto sync disabled; local clipboard polling not started");
        None
    };

    let handler = Arc::new(WebSocketHandler::new(
        registry.clone(),
        broadcaster,
        Arc::new(LogStatusSink),
    ));

    tokio::select! {
        _ = run_webserver(handler) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    if let Some(handle) = poller_handle {
        handle.abort();
    }
    registry.close_all().await;

    Ok(())
}
