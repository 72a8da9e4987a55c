pub mod handlers;

use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::Filter;

use crate::config::Setting;
use handlers::websocket::WebSocketHandler;

/// Peers connect at `/ws/{device_id}`; the path segment is the opaque
/// device identifier for the lifetime of the connection.
pub fn websocket_route(
    handler: Arc<WebSocketHandler>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("ws" / String)
        .and(warp::ws())
        .and(with_handler(handler))
        .map(
            |device_id: String, ws: warp::ws::Ws, handler: Arc<WebSocketHandler>| {
                ws.on_upgrade(move |socket| async move {
                    handler.client_connected(socket, device_id).await;
                })
            },
        )
}

fn with_handler(
    handler: Arc<WebSocketHandler>,
) -> impl Filter<Extract = (Arc<WebSocketHandler>,), Error = Infallible> + Clone {
    warp::any().map(move || handler.clone())
}

pub async fn run_webserver(handler: Arc<WebSocketHandler>) {
    let port = Setting::get_instance().network.webserver_port;
    let routes = websocket_route(handler);
    info!("WebSocket server listening on 0.0.0.0:{}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
