//! TCP acceptor for the SMPP port.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, span, Instrument, Level};

use crate::bootstrap::Shutdown;
use crate::smsc::Smsc;

use super::connection::{Connection, ConnectionId};
use super::session::SmppSession;

/// Listener accepting ESME connections and spawning one handler per
/// connection.
pub struct SmppListener {
    smsc: Arc<Smsc>,
    listener: TcpListener,
    shutdown: Arc<Shutdown>,
    next_connection_id: AtomicU64,
}

impl SmppListener {
    /// Bind the SMPP port. A bind failure is fatal for the process.
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
            next_connection_id: AtomicU64::new(1),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Accept errors are logged and the loop continues;
    /// only shutdown ends it.
    pub async fn run(self) -> io::Result<()> {
        info!(address = %self.listener.local_addr()?, "smsc listening");

        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    info!("smsc listener shutting down");
                    break;
                }

                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer_addr)) => self.handle_accept(stream, peer_addr),
                        Err(e) => error!(error = %e, "accept error"),
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_accept(&self, stream: TcpStream, peer_addr: SocketAddr) {
        if let Err(e) = stream.set_nodelay(true) {
            debug!(peer = %peer_addr, error = %e, "set_nodelay failed");
        }

        let id = ConnectionId(self.next_connection_id.fetch_add(1, Ordering::SeqCst));
        let (reader, writer) = stream.into_split();
        let conn = Arc::new(Connection::new(id, peer_addr, writer));
        let smsc = self.smsc.clone();

        let span = span!(Level::INFO, "conn", id = %id, peer = %peer_addr);

        tokio::spawn(
            async move {
                debug!("connection accepted");

                let mut session = SmppSession::new(smsc.clone(), conn.clone());
                if let Err(e) = session.run(reader).await {
                    debug!(error = %e, "session ended with error");
                }

                // Unconditional cleanup: a bound session must not outlive
                // its connection handler.
                smsc.registry().remove(conn.id()).await;
                debug!("connection closed");
            }
            .instrument(span),
        );
    }
}
