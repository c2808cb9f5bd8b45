//! Text encoding for mobile-originated delivery.
//!
//! MO text is always sent as UCS-2 (data_coding 0x08). Payloads beyond the
//! 140-octet short_message limit are split into parts carrying the
//! concatenated-SM User-Data-Header.

/// Capacity of the short_message field in octets.
pub const MAX_SHORT_MESSAGE_LEN: usize = 140;

/// Payload octets per part once the 6-octet UDH is present.
const UDH_PART_LEN: usize = 134;

/// UDH: length 5, IEI 0x00 (concatenated SM, 8-bit ref), IE length 3,
/// then ref / total / index.
const UDH_CONCAT: [u8; 3] = [0x05, 0x00, 0x03];

/// Message reference stamped on every concatenated message.
const CONCAT_REF: u8 = 0x01;

/// Encode text as UCS-2 big-endian, one 16-bit unit per code point.
/// Code points above U+FFFF do not fit a unit and become `?`.
pub fn ucs2_encode(text: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let unit = u32::from(ch);
        let unit = if unit > 0xFFFF { b'?' as u16 } else { unit as u16 };
        buf.extend_from_slice(&unit.to_be_bytes());
    }
    buf
}

/// Split an encoded payload into short_message parts.
///
/// A payload within the 140-octet limit is returned as a single part with
/// no UDH. Longer payloads are cut at raw 134-octet boundaries and each
/// part is prefixed with the concatenation UDH; the caller is responsible
/// for setting the UDHI bit in esm_class when more than one part comes
/// back. Cuts are byte cuts and may bisect a UCS-2 unit.
pub fn udh_segments(payload: &[u8]) -> Vec<Vec<u8>> {
    if payload.len() <= MAX_SHORT_MESSAGE_LEN {
        return vec![payload.to_vec()];
    }

    let total = payload.len().div_ceil(UDH_PART_LEN);
    let mut parts = Vec::with_capacity(total);
    for (index, chunk) in payload.chunks(UDH_PART_LEN).enumerate() {
        let mut part = Vec::with_capacity(UDH_CONCAT.len() + 3 + chunk.len());
        part.extend_from_slice(&UDH_CONCAT);
        part.push(CONCAT_REF);
        part.push(total as u8);
        part.push(index as u8 + 1);
        part.extend_from_slice(chunk);
        parts.push(part);
    }
    parts
}
