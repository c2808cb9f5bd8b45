//! Delivery receipt generation.
//!
//! A receipt is a deliver_sm with the delivery-receipt esm_class bit,
//! sent back over the connection that submitted the message, with source
//! and destination swapped relative to the submit_sm.

use bytes::Bytes;
use chrono::{DateTime, Local};
use tokio::time::Duration;

use crate::pdu::{self, tlv, Tlv};

/// Wait between submit_sm_resp and the receipt.
pub const RECEIPT_DELAY: Duration = Duration::from_millis(2000);

/// message_state TLV values.
const STATE_DELIVERED: u8 = 2;
const STATE_UNDELIVERABLE: u8 = 5;

/// Build the complete receipt PDU.
pub fn delivery_receipt(
    source: &str,
    destination: &str,
    message_id: &str,
    submit_date: DateTime<Local>,
    done_date: DateTime<Local>,
    failed: bool,
) -> Bytes {
    let text = receipt_text(message_id, submit_date, done_date, failed);
    let state = if failed { STATE_UNDELIVERABLE } else { STATE_DELIVERED };
    let tlvs = [
        Tlv::cstring(tlv::RECEIPTED_MESSAGE_ID, message_id),
        Tlv::byte(tlv::MESSAGE_STATE, state),
    ];

    pdu::deliver_sm(
        source,
        destination,
        text.as_bytes(),
        pdu::CODING_DEFAULT,
        rand::random(),
        pdu::ESM_DELIVERY_RECEIPT,
        &tlvs,
    )
}

/// The textual receipt body in the common SMSC appendix-B shape.
fn receipt_text(
    message_id: &str,
    submit_date: DateTime<Local>,
    done_date: DateTime<Local>,
    failed: bool,
) -> String {
    let submitted = submit_date.format("%y%m%d%H%M");
    let done = done_date.format("%y%m%d%H%M");
    if failed {
        format!(
            "id:{message_id} sub:001 dlvrd:000 submit date:{submitted} done date:{done} stat:UNDELIV err:069 Text:..."
        )
    } else {
        format!(
            "id:{message_id} sub:001 dlvrd:001 submit date:{submitted} done date:{done} stat:DELIVRD err:000 Text:..."
        )
    }
}
