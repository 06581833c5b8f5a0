// src/server/reload.rs

//! Reload signalling and WebSocket client sessions.
//!
//! Browser clients connect to `/__plugsync/ws`; every [`ReloadHandle::reload`]
//! call fans a text frame out to all of them over a broadcast channel.
//! Everything here is best effort: reloading with zero connected clients is
//! a no-op, and a client that stops reading is simply dropped.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::debug;

use super::AppState;

/// Frame pushed to browser clients on each reload signal.
const RELOAD_FRAME: &str = "reload";

/// Cheaply clonable handle used to tell connected browsers to refresh.
///
/// Constructed by [`super::DevServer`] and handed to the watcher / mover;
/// there is no process-wide instance. A handle created outside a running
/// server (e.g. in tests, or before `init`) is valid and simply has no
/// subscribers.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    tx: broadcast::Sender<()>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(16);
        Self { tx }
    }

    /// Broadcast a refresh signal to all connected clients.
    ///
    /// Never fails: with no clients connected there is nobody to notify and
    /// the signal is dropped.
    pub fn reload(&self) {
        match self.tx.send(()) {
            Ok(clients) => debug!(clients, "reload signal sent"),
            Err(_) => debug!("reload requested with no connected clients"),
        }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum handler for the reload WebSocket endpoint.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let rx = state.reload.subscribe();
    ws.on_upgrade(move |socket| client_session(socket, rx))
}

/// Per-client loop: forward reload signals until either side goes away.
async fn client_session(socket: WebSocket, mut rx: broadcast::Receiver<()>) {
    debug!("reload client connected");
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            signal = rx.recv() => match signal {
                Ok(()) => {
                    if sender.send(Message::Text(RELOAD_FRAME.into())).await.is_err() {
                        break;
                    }
                }
                // A slow client missed some signals; one refresh covers them all.
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    if sender.send(Message::Text(RELOAD_FRAME.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Clients have nothing meaningful to say; drain and ignore.
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("reload client disconnected");
}
