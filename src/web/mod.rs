//! Web UI for injecting mobile-originated messages.
//!
//! A single page: a form with sender, recipient, message text and a
//! selector over the currently bound system_ids. Submissions go through
//! `Smsc::send_mo` and the outcome is reported via a redirect back to the
//! form.

mod handlers;
mod server;

pub use server::WebServer;
