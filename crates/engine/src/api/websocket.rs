//! WebSocket chat channel.
//!
//! Plain text in, plain text out. Each incoming text frame is relayed to the
//! LLM and answered with one tagged text frame; failures are answered with an
//! `Error: ...` frame and the socket stays open.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app::App;

/// Buffer size for per-connection reply channel.
const CONNECTION_CHANNEL_BUFFER: usize = 64;

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<Arc<App>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, app: Arc<App>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let connection_id = Uuid::new_v4();

    let (tx, mut rx) = mpsc::channel::<String>(CONNECTION_CHANNEL_BUFFER);

    tracing::info!(connection_id = %connection_id, "Chat connection established");

    // Forward replies from the channel to the socket
    let send_task = tokio::spawn(async move {
        while let Some(reply) = rx.recv().await {
            if ws_sender.send(Message::Text(reply.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                // Replies may arrive out of order when the models differ in speed.
                let app = app.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reply = app.use_cases.chat.ops.relay(text.as_str()).await;
                    if tx.send(reply).await.is_err() {
                        tracing::debug!(connection_id = %connection_id, "Connection closed before reply");
                    }
                });
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "Chat connection closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    send_task.abort();

    tracing::info!(connection_id = %connection_id, "Chat connection terminated");
}
