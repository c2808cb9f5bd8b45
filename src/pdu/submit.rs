//! Inbound body parsing.
//!
//! Only the fields the simulator acts on are pulled out; everything after
//! registered_delivery (replace_if_present, data_coding, the short message
//! itself, trailing TLVs) is ignored.

use thiserror::Error;

/// A required field ran past the end of the body or lost its null
/// terminator.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed pdu body at {0}")]
pub struct MalformedBody(pub &'static str);

/// The slice of a submit_sm body the simulator inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSm {
    pub source_addr: String,
    pub dest_addr: String,
    pub registered_delivery: u8,
}

impl SubmitSm {
    /// Walk the mandatory submit_sm fields up to registered_delivery.
    ///
    /// Field order per SMPP 3.4: service_type, source TON/NPI,
    /// source_addr, dest TON/NPI, destination_addr, esm_class,
    /// protocol_id, priority_flag, schedule_delivery_time,
    /// validity_period, registered_delivery.
    pub fn parse(body: &[u8]) -> Result<Self, MalformedBody> {
        let mut cur = body;
        take_cstring(&mut cur, "service_type")?;
        skip(&mut cur, 2, "source ton/npi")?;
        let source_addr = take_cstring(&mut cur, "source_addr")?;
        skip(&mut cur, 2, "dest ton/npi")?;
        let dest_addr = take_cstring(&mut cur, "destination_addr")?;
        skip(&mut cur, 3, "esm_class/protocol_id/priority_flag")?;
        take_cstring(&mut cur, "schedule_delivery_time")?;
        take_cstring(&mut cur, "validity_period")?;
        let registered_delivery = *cur.first().ok_or(MalformedBody("registered_delivery"))?;

        Ok(Self {
            source_addr: String::from_utf8_lossy(source_addr).into_owned(),
            dest_addr: String::from_utf8_lossy(dest_addr).into_owned(),
            registered_delivery,
        })
    }
}

/// First null-terminated field of a PDU body, without the terminator.
/// `None` when no terminator exists.
pub fn first_cstring(body: &[u8]) -> Option<&[u8]> {
    let end = body.iter().position(|&b| b == 0)?;
    Some(&body[..end])
}

fn take_cstring<'a>(cur: &mut &'a [u8], field: &'static str) -> Result<&'a [u8], MalformedBody> {
    let end = cur.iter().position(|&b| b == 0).ok_or(MalformedBody(field))?;
    let value = &cur[..end];
    *cur = &cur[end + 1..];
    Ok(value)
}

fn skip(cur: &mut &[u8], n: usize, field: &'static str) -> Result<(), MalformedBody> {
    if cur.len() < n {
        return Err(MalformedBody(field));
    }
    *cur = &cur[n..];
    Ok(())
}
