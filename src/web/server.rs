//! Web UI HTTP server.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::bootstrap::Shutdown;
use crate::smsc::Smsc;

use super::handlers::{render_page, submit_message};

/// HTTP server for the MO-injection form.
pub struct WebServer {
    smsc: Arc<Smsc>,
    listener: TcpListener,
    shutdown: Arc<Shutdown>,
}

impl WebServer {
    pub async fn bind(
        smsc: Arc<Smsc>,
        address: SocketAddr,
        shutdown: Arc<Shutdown>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self {
            smsc,
            listener,
            shutdown,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until shutdown.
    pub async fn run(self) -> io::Result<()> {
        info!(address = %self.listener.local_addr()?, "web ui listening");

        let app = Router::new()
            .route("/", get(render_page).post(submit_message))
            .with_state(self.smsc);

        let mut shutdown_rx = self.shutdown.subscribe();
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    }
}
