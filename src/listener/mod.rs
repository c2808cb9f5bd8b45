//! Listener module: accepting connections and driving SMPP sessions.
//!
//! - The acceptor binds the SMPP port and spawns one handler per
//!   accepted connection
//! - Handlers own the read side of their stream; writes go through a
//!   shared, mutex-guarded `Connection`
//! - Bound sessions are registered for enumeration and MO delivery

mod acceptor;
mod connection;
mod registry;
mod session;

pub use acceptor::SmppListener;
pub use connection::{Connection, ConnectionId};
pub use registry::{Session, SessionRegistry, SharedSessionRegistry};
pub use session::{SessionError, SessionState, SmppSession};
