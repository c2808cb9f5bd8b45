//! Outbound PDU construction.
//!
//! Builders return complete frames with `command_length` already filled in,
//! ready to be written to a connection in one call.

use bytes::{BufMut, Bytes, BytesMut};

use super::codec::HEADER_LEN;
use super::{command, status, SYSTEM_ID};

/// An optional parameter: 16-bit tag, 16-bit length, raw value octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub tag: u16,
    pub value: Bytes,
}

impl Tlv {
    pub fn new(tag: u16, value: impl Into<Bytes>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// TLV carrying a null-terminated string value.
    pub fn cstring(tag: u16, value: &str) -> Self {
        let mut buf = BytesMut::with_capacity(value.len() + 1);
        buf.put_slice(value.as_bytes());
        buf.put_u8(0);
        Self::new(tag, buf.freeze())
    }

    /// TLV carrying a single octet.
    pub fn byte(tag: u16, value: u8) -> Self {
        Self::new(tag, Bytes::copy_from_slice(&[value]))
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.tag);
        buf.put_u16(self.value.len() as u16);
        buf.put_slice(&self.value);
    }
}

/// A body-less PDU: 16 octets, `command_length = 16`.
pub fn header(command_id: u32, command_status: u32, sequence: u32) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_LEN);
    buf.put_u32(HEADER_LEN as u32);
    buf.put_u32(command_id);
    buf.put_u32(command_status);
    buf.put_u32(sequence);
    buf.freeze()
}

/// A PDU whose body is a single null-terminated string.
pub fn with_string_body(command_id: u32, command_status: u32, sequence: u32, body: &str) -> Bytes {
    let len = HEADER_LEN + body.len() + 1;
    let mut buf = BytesMut::with_capacity(len);
    buf.put_u32(len as u32);
    buf.put_u32(command_id);
    buf.put_u32(command_status);
    buf.put_u32(sequence);
    buf.put_slice(body.as_bytes());
    buf.put_u8(0);
    buf.freeze()
}

/// A complete deliver_sm frame.
///
/// `short_message` is already encoded (and UDH-prefixed where applicable);
/// its length must fit the one-octet sm_length field. TLVs are appended
/// after the short message and `command_length` is computed last.
pub fn deliver_sm(
    sender: &str,
    recipient: &str,
    short_message: &[u8],
    data_coding: u8,
    sequence: u32,
    esm_class: u8,
    tlvs: &[Tlv],
) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_LEN + 64 + short_message.len());
    buf.put_u32(0); // command_length, patched below
    buf.put_u32(command::DELIVER_SM);
    buf.put_u32(status::OK);
    buf.put_u32(sequence);

    put_cstring(&mut buf, SYSTEM_ID); // service_type
    buf.put_u8(0); // source_addr_ton
    buf.put_u8(0); // source_addr_npi
    put_cstring(&mut buf, sender);
    buf.put_u8(0); // dest_addr_ton
    buf.put_u8(0); // dest_addr_npi
    put_cstring(&mut buf, recipient);
    buf.put_u8(esm_class);
    buf.put_u8(0); // protocol_id
    buf.put_u8(0); // priority_flag
    buf.put_u8(0); // schedule_delivery_time
    buf.put_u8(0); // validity_period
    buf.put_u8(0); // registered_delivery
    buf.put_u8(0); // replace_if_present
    buf.put_u8(data_coding);
    buf.put_u8(0); // sm_default_msg_id
    buf.put_u8(short_message.len() as u8);
    buf.put_slice(short_message);

    for tlv in tlvs {
        tlv.encode(&mut buf);
    }

    let command_length = buf.len() as u32;
    buf[0..4].copy_from_slice(&command_length.to_be_bytes());
    buf.freeze()
}

/// Null-terminated string field; an empty string is a single null octet.
fn put_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}
