//! smscsim: an SMPP v3.4 SMSC simulator.
//!
//! The simulator accepts ESME binds over plain TCP, answers submit_sm
//! with generated message ids, pushes delayed delivery receipts, and
//! exposes a small web UI for injecting mobile-originated messages into
//! bound receiver sessions. Useful for developing and testing SMPP
//! client applications against a cooperative peer.

pub mod bootstrap;
pub mod config;
pub mod encoding;
pub mod listener;
pub mod pdu;
pub mod smsc;
pub mod telemetry;
pub mod web;
