//! Shared per-connection write handle.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// Unique connection identifier; doubles as the registry key for the
/// session bound on this connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Write side of an accepted connection.
///
/// The owning handler writes responses here, and so do deferred receipt
/// tasks and the MO sender. The mutex serializes writers at PDU
/// granularity: one frame's octets never interleave with another's.
/// Reading the stream stays exclusive to the handler.
pub struct Connection {
    id: ConnectionId,
    peer_addr: SocketAddr,
    writer: Mutex<OwnedWriteHalf>,
}

impl Connection {
    pub fn new(id: ConnectionId, peer_addr: SocketAddr, writer: OwnedWriteHalf) -> Self {
        Self {
            id,
            peer_addr,
            writer: Mutex::new(writer),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Write one complete PDU frame.
    pub async fn write_pdu(&self, pdu: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(pdu).await?;
        writer.flush().await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("peer_addr", &self.peer_addr)
            .finish()
    }
}
