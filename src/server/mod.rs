// src/server/mod.rs

//! Local dev server: reverse proxy plus reload channel.
//!
//! This replaces the browser-sync step of the original workflow. The server
//! is an explicit object constructed once at dev-session start and torn down
//! on drop; there is no global instance. It serves two things:
//!
//! - `/__plugsync/ws`: WebSocket endpoint browsers connect to for reload
//!   signals (`reload.rs`).
//! - everything else: reverse-proxied to the configured upstream dev URL
//!   (`proxy.rs`).

pub mod proxy;
pub mod reload;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use reload::ReloadHandle;

/// Shared state for the axum handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: reqwest::Client,
    pub(crate) upstream: String,
    pub(crate) reload: ReloadHandle,
}

/// Running dev server.
///
/// Holds the reload channel and the serve task; dropping the server aborts
/// the task and disconnects all clients.
pub struct DevServer {
    addr: SocketAddr,
    reload: ReloadHandle,
    task: JoinHandle<()>,
}

impl DevServer {
    /// Bind `127.0.0.1:<port>` and start serving.
    ///
    /// `upstream` is the dev site URL all non-reload traffic is forwarded
    /// to. Port 0 asks the OS for a free port; see [`DevServer::local_addr`].
    pub async fn init(port: u16, upstream: &str) -> Result<Self> {
        let reload = ReloadHandle::new();

        let state = AppState {
            client: reqwest::Client::new(),
            upstream: upstream.to_string(),
            reload: reload.clone(),
        };

        let app = Router::new()
            .route("/__plugsync/ws", get(reload::ws_handler))
            .fallback(proxy::proxy_handler)
            .with_state(state);

        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("binding dev server to 127.0.0.1:{port}"))?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                error!(error = %err, "dev server stopped");
            }
        });

        info!(%addr, upstream, "dev server listening");

        Ok(Self { addr, reload, task })
    }

    /// Address the server actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Handle for pushing reload signals; cheap to clone and hand out.
    pub fn reload_handle(&self) -> ReloadHandle {
        self.reload.clone()
    }

    /// Tell all connected browser clients to refresh.
    pub fn reload(&self) {
        self.reload.reload();
    }
}

impl Drop for DevServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
