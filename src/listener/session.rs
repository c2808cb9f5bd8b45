//! SMPP session state machine.
//!
//! One `SmppSession` drives one accepted connection: it reads framed PDUs,
//! dispatches on command id, writes responses, and maintains the bind
//! state. Delivery receipts are handed off to deferred tasks that share
//! the connection's write handle.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use futures::StreamExt;
use thiserror::Error;
use tokio::net::tcp::OwnedReadHalf;
use tokio::time::sleep;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};

use crate::pdu::{self, command, status, CodecError, PduCodec, RawPdu, SubmitSm};
use crate::smsc::{receipt, Smsc};

use super::connection::Connection;
use super::registry::Session;

/// system_id reported in logs while no bind is in effect.
const ANONYMOUS: &str = "anonymous";

/// Session error types. All of them end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("framing error: {0}")]
    Codec(#[from] CodecError),
}

/// Protocol-level session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection established, no bind in effect
    Open,
    /// Bound as transmitter
    BoundTx,
    /// Bound as receiver
    BoundRx,
    /// Bound as transceiver
    BoundTrx,
    /// Connection torn down
    Closed,
}

impl SessionState {
    fn is_bound(&self) -> bool {
        matches!(self, Self::BoundTx | Self::BoundRx | Self::BoundTrx)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Open => write!(f, "OPEN"),
            SessionState::BoundTx => write!(f, "BOUND_TX"),
            SessionState::BoundRx => write!(f, "BOUND_RX"),
            SessionState::BoundTrx => write!(f, "BOUND_TRX"),
            SessionState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Per-connection protocol handler.
pub struct SmppSession {
    smsc: Arc<Smsc>,
    conn: Arc<Connection>,
    state: SessionState,
    system_id: String,
    /// Sticky bind_receiver marker: survives unbind, so a submit_sm from
    /// an ex-receiver still gets the invalid-bind-status answer.
    receiver_only: bool,
}

impl SmppSession {
    pub fn new(smsc: Arc<Smsc>, conn: Arc<Connection>) -> Self {
        Self {
            smsc,
            conn,
            state: SessionState::Open,
            system_id: ANONYMOUS.to_string(),
            receiver_only: false,
        }
    }

    /// Run until the peer disconnects, a framing or I/O error occurs, or
    /// a bind request arrives without a system_id terminator.
    ///
    /// Registry cleanup is the caller's responsibility and must happen
    /// whether this returns Ok or Err.
    pub async fn run(&mut self, reader: OwnedReadHalf) -> Result<(), SessionError> {
        let mut frames = FramedRead::new(reader, PduCodec);

        while let Some(frame) = frames.next().await {
            let frame = frame?;
            if !self.handle_pdu(frame).await? {
                break;
            }
        }

        self.state = SessionState::Closed;
        Ok(())
    }

    /// Dispatch one PDU. Returns false to close the connection.
    async fn handle_pdu(&mut self, pdu: RawPdu) -> Result<bool, SessionError> {
        match pdu.command_id {
            command::BIND_RECEIVER | command::BIND_TRANSMITTER | command::BIND_TRANSCEIVER => {
                self.handle_bind(pdu).await
            }
            command::UNBIND => {
                self.handle_unbind(pdu).await?;
                Ok(true)
            }
            command::ENQUIRE_LINK => {
                debug!(system_id = %self.system_id, "enquire_link");
                self.conn
                    .write_pdu(&pdu::header(command::ENQUIRE_LINK_RESP, status::OK, pdu.sequence))
                    .await?;
                Ok(true)
            }
            command::SUBMIT_SM => {
                self.handle_submit_sm(pdu).await?;
                Ok(true)
            }
            command::DELIVER_SM_RESP => {
                debug!(system_id = %self.system_id, sequence = pdu.sequence, "deliver_sm_resp");
                Ok(true)
            }
            other => {
                warn!(
                    system_id = %self.system_id,
                    command_id = other,
                    "unsupported command"
                );
                self.conn
                    .write_pdu(&pdu::header(command::GENERIC_NACK, status::INVALID_CMD, pdu.sequence))
                    .await?;
                Ok(true)
            }
        }
    }

    async fn handle_bind(&mut self, pdu: RawPdu) -> Result<bool, SessionError> {
        let Some(system_id) = pdu::first_cstring(&pdu.body) else {
            warn!("bind body has no system_id terminator, closing connection");
            return Ok(false);
        };
        let system_id = String::from_utf8_lossy(system_id).into_owned();
        info!(
            system_id = %system_id,
            command = command::name(pdu.command_id),
            "bind request"
        );

        let resp_id = command::resp(pdu.command_id);

        if self.state.is_bound() {
            warn!(system_id = %system_id, "connection already has a bound session");
            self.conn
                .write_pdu(&pdu::header(resp_id, status::ALREADY_BOUND, pdu.sequence))
                .await?;
            return Ok(true);
        }

        let receive_mo = matches!(
            pdu.command_id,
            command::BIND_RECEIVER | command::BIND_TRANSCEIVER
        );
        self.smsc
            .registry()
            .insert(
                self.conn.id(),
                Session {
                    system_id: system_id.clone(),
                    conn: self.conn.clone(),
                    receive_mo,
                },
            )
            .await;

        self.conn
            .write_pdu(&pdu::with_string_body(resp_id, status::OK, pdu.sequence, pdu::SYSTEM_ID))
            .await?;

        self.system_id = system_id;
        self.receiver_only = pdu.command_id == command::BIND_RECEIVER;
        self.state = match pdu.command_id {
            command::BIND_RECEIVER => SessionState::BoundRx,
            command::BIND_TRANSMITTER => SessionState::BoundTx,
            _ => SessionState::BoundTrx,
        };
        info!(system_id = %self.system_id, state = %self.state, "bound");

        Ok(true)
    }

    async fn handle_unbind(&mut self, pdu: RawPdu) -> Result<(), SessionError> {
        info!(system_id = %self.system_id, "unbind request");

        self.smsc.registry().remove(self.conn.id()).await;
        self.conn
            .write_pdu(&pdu::header(command::UNBIND_RESP, status::OK, pdu.sequence))
            .await?;

        // The connection stays open; the peer may bind again.
        self.state = SessionState::Open;
        self.system_id = ANONYMOUS.to_string();
        Ok(())
    }

    async fn handle_submit_sm(&mut self, pdu: RawPdu) -> Result<(), SessionError> {
        debug!(system_id = %self.system_id, sequence = pdu.sequence, "submit_sm");

        if self.receiver_only {
            warn!(
                system_id = %self.system_id,
                "receiver session cannot submit messages"
            );
            return self
                .conn
                .write_pdu(&pdu::header(command::SUBMIT_SM_RESP, status::INV_BIND_STS, pdu.sequence))
                .await
                .map_err(Into::into);
        }

        if !self.state.is_bound() {
            warn!("submit_sm outside a bound session");
            return self
                .conn
                .write_pdu(&pdu::header(command::GENERIC_NACK, status::INVALID_CMD, pdu.sequence))
                .await
                .map_err(Into::into);
        }

        let submit = match SubmitSm::parse(&pdu.body) {
            Ok(submit) => submit,
            Err(e) => {
                warn!(system_id = %self.system_id, error = %e, "rejecting submit_sm");
                return self
                    .conn
                    .write_pdu(&pdu::header(command::GENERIC_NACK, status::INVALID_CMD, pdu.sequence))
                    .await
                    .map_err(Into::into);
            }
        };

        let message_id = rand::random::<u64>().to_string();

        if self.smsc.failed_submits() && pdu.sequence % 2 == 0 {
            return self
                .conn
                .write_pdu(&pdu::header(command::SUBMIT_SM_RESP, status::SYS_ERROR, pdu.sequence))
                .await
                .map_err(Into::into);
        }

        self.conn
            .write_pdu(&pdu::with_string_body(
                command::SUBMIT_SM_RESP,
                status::OK,
                pdu.sequence,
                &message_id,
            ))
            .await?;

        if submit.registered_delivery != 0 {
            self.schedule_receipt(submit, message_id);
        }

        Ok(())
    }

    /// Deferred delivery receipt: sleep, then push a deliver_sm through
    /// the shared write handle. A failed write is logged and dropped; the
    /// task dies with the connection.
    fn schedule_receipt(&self, submit: SubmitSm, message_id: String) {
        let conn = self.conn.clone();
        let failed = self.smsc.failed_submits();
        let system_id = self.system_id.clone();

        tokio::spawn(async move {
            sleep(receipt::RECEIPT_DELAY).await;
            let now = Local::now();
            let dlr = receipt::delivery_receipt(
                &submit.dest_addr,
                &submit.source_addr,
                &message_id,
                now,
                now,
                failed,
            );
            match conn.write_pdu(&dlr).await {
                Ok(()) => info!(
                    system_id = %system_id,
                    message_id = %message_id,
                    "delivery receipt sent"
                ),
                Err(e) => warn!(
                    system_id = %system_id,
                    message_id = %message_id,
                    error = %e,
                    "failed to send delivery receipt"
                ),
            }
        });
    }
}
