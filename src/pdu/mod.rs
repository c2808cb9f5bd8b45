//! SMPP v3.4 wire protocol primitives.
//!
//! Every PDU starts with a 16-octet big-endian header (`command_length`,
//! `command_id`, `command_status`, `sequence_number`) followed by
//! `command_length - 16` body octets. Strings inside bodies are
//! null-terminated; optional parameters are appended as TLVs.

mod builder;
mod codec;
mod submit;

pub use builder::{deliver_sm, header, with_string_body, Tlv};
pub use codec::{CodecError, PduCodec, RawPdu, HEADER_LEN, MAX_PDU_LEN};
pub use submit::{first_cstring, MalformedBody, SubmitSm};

/// Command identifiers handled by the simulator.
pub mod command {
    pub const GENERIC_NACK: u32 = 0x8000_0000;
    pub const BIND_RECEIVER: u32 = 0x0000_0001;
    pub const BIND_TRANSMITTER: u32 = 0x0000_0002;
    pub const BIND_TRANSCEIVER: u32 = 0x0000_0009;
    pub const SUBMIT_SM: u32 = 0x0000_0004;
    pub const SUBMIT_SM_RESP: u32 = 0x8000_0004;
    pub const DELIVER_SM: u32 = 0x0000_0005;
    pub const DELIVER_SM_RESP: u32 = 0x8000_0005;
    pub const UNBIND: u32 = 0x0000_0006;
    pub const UNBIND_RESP: u32 = 0x8000_0006;
    pub const ENQUIRE_LINK: u32 = 0x0000_0015;
    pub const ENQUIRE_LINK_RESP: u32 = 0x8000_0015;

    /// High bit distinguishing responses from requests.
    pub const RESP_MASK: u32 = 0x8000_0000;

    /// Response command id for a request command id.
    pub fn resp(command_id: u32) -> u32 {
        command_id | RESP_MASK
    }

    /// Mnemonic for logging. Unknown ids keep their numeric form.
    pub fn name(command_id: u32) -> &'static str {
        match command_id {
            GENERIC_NACK => "generic_nack",
            BIND_RECEIVER => "bind_receiver",
            BIND_TRANSMITTER => "bind_transmitter",
            BIND_TRANSCEIVER => "bind_transceiver",
            SUBMIT_SM => "submit_sm",
            SUBMIT_SM_RESP => "submit_sm_resp",
            DELIVER_SM => "deliver_sm",
            DELIVER_SM_RESP => "deliver_sm_resp",
            UNBIND => "unbind",
            UNBIND_RESP => "unbind_resp",
            ENQUIRE_LINK => "enquire_link",
            ENQUIRE_LINK_RESP => "enquire_link_resp",
            _ => "unknown",
        }
    }
}

/// Command status values used by the simulator.
pub mod status {
    pub const OK: u32 = 0x0000_0000;
    pub const INVALID_CMD: u32 = 0x0000_0003;
    pub const INV_BIND_STS: u32 = 0x0000_0004;
    pub const ALREADY_BOUND: u32 = 0x0000_0005;
    pub const SYS_ERROR: u32 = 0x0000_0008;
}

/// Optional parameter tags.
pub mod tlv {
    pub const RECEIPTED_MESSAGE_ID: u16 = 0x001E;
    pub const MESSAGE_STATE: u16 = 0x0427;
}

/// GSM 03.38 default alphabet.
pub const CODING_DEFAULT: u8 = 0x00;
/// UCS-2 big-endian, two octets per code unit.
pub const CODING_UCS2: u8 = 0x08;

/// esm_class bit marking a delivery receipt.
pub const ESM_DELIVERY_RECEIPT: u8 = 0x04;
/// esm_class bit marking a User-Data-Header prefix in short_message.
pub const ESM_UDHI: u8 = 0x40;

/// system_id the simulator announces in bind responses, and the
/// service_type it stamps on every deliver_sm.
pub const SYSTEM_ID: &str = "smscsim";
