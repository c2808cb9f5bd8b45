//! Inbound PDU framing.

use bytes::{Buf, Bytes, BytesMut};
use thiserror::Error;
use tokio_util::codec::Decoder;

/// Fixed PDU header size in octets.
pub const HEADER_LEN: usize = 16;

/// Upper bound on a single PDU; anything larger is a framing error.
pub const MAX_PDU_LEN: usize = 64 * 1024;

/// Framing errors. Any of these is terminal for the connection.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("command_length {0} below the {HEADER_LEN}-octet header minimum")]
    LengthTooSmall(u32),

    #[error("command_length {0} exceeds the {MAX_PDU_LEN}-octet limit")]
    LengthTooLarge(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One decoded frame: parsed header plus the raw body octets.
///
/// Bodies stay opaque here; each handler interprets the ones it cares
/// about and drains the rest.
#[derive(Debug, Clone)]
pub struct RawPdu {
    pub command_id: u32,
    pub command_status: u32,
    pub sequence: u32,
    pub body: Bytes,
}

/// Frame decoder for the SMPP byte stream.
#[derive(Debug, Default)]
pub struct PduCodec;

impl Decoder for PduCodec {
    type Item = RawPdu;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RawPdu>, CodecError> {
        if src.len() < 4 {
            return Ok(None);
        }

        let command_length = (&src[..4]).get_u32();
        if (command_length as usize) < HEADER_LEN {
            return Err(CodecError::LengthTooSmall(command_length));
        }
        if command_length as usize > MAX_PDU_LEN {
            return Err(CodecError::LengthTooLarge(command_length));
        }

        let frame_len = command_length as usize;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let mut frame = src.split_to(frame_len);
        frame.advance(4);
        let command_id = frame.get_u32();
        let command_status = frame.get_u32();
        let sequence = frame.get_u32();

        Ok(Some(RawPdu {
            command_id,
            command_status,
            sequence,
            body: frame.freeze(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{command, header, status, with_string_body};

    fn decode_all(bytes: &[u8]) -> Vec<RawPdu> {
        let mut codec = PduCodec;
        let mut buf = BytesMut::from(bytes);
        let mut out = Vec::new();
        while let Some(pdu) = codec.decode(&mut buf).unwrap() {
            out.push(pdu);
        }
        out
    }

    #[test]
    fn decodes_header_only_pdu() {
        let pdus = decode_all(&header(command::ENQUIRE_LINK, status::OK, 0xEA));
        assert_eq!(pdus.len(), 1);
        assert_eq!(pdus[0].command_id, command::ENQUIRE_LINK);
        assert_eq!(pdus[0].command_status, status::OK);
        assert_eq!(pdus[0].sequence, 0xEA);
        assert!(pdus[0].body.is_empty());
    }

    #[test]
    fn round_trips_string_body() {
        let pdus = decode_all(&with_string_body(command::SUBMIT_SM_RESP, status::OK, 7, "99"));
        assert_eq!(pdus[0].body.as_ref(), b"99\0");
    }

    #[test]
    fn decodes_back_to_back_frames() {
        let mut bytes = header(command::ENQUIRE_LINK, status::OK, 1).to_vec();
        bytes.extend_from_slice(&header(command::UNBIND, status::OK, 2));
        let pdus = decode_all(&bytes);
        assert_eq!(pdus.len(), 2);
        assert_eq!(pdus[1].command_id, command::UNBIND);
        assert_eq!(pdus[1].sequence, 2);
    }

    #[test]
    fn waits_for_full_frame() {
        let frame = with_string_body(command::SUBMIT_SM_RESP, status::OK, 3, "msg");
        let mut codec = PduCodec;
        let mut buf = BytesMut::new();

        for &byte in &frame[..frame.len() - 1] {
            buf.extend_from_slice(&[byte]);
            assert!(codec.decode(&mut buf).unwrap().is_none());
        }

        buf.extend_from_slice(&frame[frame.len() - 1..]);
        let pdu = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(pdu.body.as_ref(), b"msg\0");
        assert!(buf.is_empty());
    }

    #[test]
    fn rejects_undersized_length() {
        let mut codec = PduCodec;
        let mut buf = BytesMut::from(&[0x00, 0x00, 0x00, 0x0F, 0x00][..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::LengthTooSmall(15))
        ));
    }

    #[test]
    fn rejects_oversized_length() {
        let mut codec = PduCodec;
        let mut buf = BytesMut::from(&[0x00, 0x10, 0x00, 0x01][..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::LengthTooLarge(_))
        ));
    }
}
