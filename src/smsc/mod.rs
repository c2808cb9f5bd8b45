//! The simulator core shared by every connection handler and the web UI.

pub mod receipt;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::encoding;
use crate::listener::{SessionRegistry, SharedSessionRegistry};
use crate::pdu;

/// MO delivery failure, reported to the caller. None of these touch the
/// target session's state.
#[derive(Debug, Error)]
pub enum MoError {
    #[error("no bound session for system_id [{0}]")]
    NoSession(String),

    #[error("session [{0}] is not bound as receiver or transceiver")]
    NotReceiver(String),

    #[error("network error delivering MO message: {0}")]
    Io(#[from] std::io::Error),
}

/// SMSC simulator state: the registry of bound sessions plus the injected
/// failure switch.
pub struct Smsc {
    registry: SharedSessionRegistry,
    /// Answer every even-sequence submit_sm with a system error, and
    /// report UNDELIV in receipts that still get scheduled.
    failed_submits: bool,
}

impl Smsc {
    pub fn new(failed_submits: bool) -> Arc<Self> {
        Arc::new(Self {
            registry: SessionRegistry::new(),
            failed_submits,
        })
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn failed_submits(&self) -> bool {
        self.failed_submits
    }

    /// system_ids of all currently bound sessions, for the web selector.
    pub async fn bound_system_ids(&self) -> Vec<String> {
        self.registry.bound_system_ids().await
    }

    /// Push a mobile-originated message to the session bound with
    /// `system_id`.
    ///
    /// The text is encoded as UCS-2 and segmented; each part goes out as
    /// its own deliver_sm with a fresh sequence number. No response from
    /// the peer is awaited.
    pub async fn send_mo(
        &self,
        sender: &str,
        recipient: &str,
        text: &str,
        system_id: &str,
    ) -> Result<(), MoError> {
        let Some(session) = self.registry.find_by_system_id(system_id).await else {
            warn!(system_id, "cannot send MO message, no bound session");
            return Err(MoError::NoSession(system_id.to_string()));
        };

        if !session.receive_mo {
            warn!(
                system_id,
                "cannot send MO message, session is not bound for receiving"
            );
            return Err(MoError::NotReceiver(system_id.to_string()));
        }

        let payload = encoding::ucs2_encode(text);
        let parts = encoding::udh_segments(&payload);
        let esm_class = if parts.len() > 1 { pdu::ESM_UDHI } else { 0x00 };

        for part in &parts {
            let frame = pdu::deliver_sm(
                sender,
                recipient,
                part,
                pdu::CODING_UCS2,
                rand::random(),
                esm_class,
                &[],
            );
            session.conn.write_pdu(&frame).await?;
        }

        info!(
            system_id,
            sender,
            recipient,
            parts = parts.len(),
            "MO message sent"
        );
        Ok(())
    }
}
