//! Flat binary layout of a [Message] on air.
//!
//! Fields are packed in declaration order, little-endian, without padding:
//!
//! | offset | size | field     |
//! |--------|------|-----------|
//! | 0      | 2    | `node_id` |
//! | 2      | 2    | `dev_id`  |
//! | 4      | 2    | `cmd`     |
//! | 6      | 4    | `int_val` |
//! | 10     | 4    | `flt_val` |
//! | 14     | 32   | `payload` |
//!
//! There is no framing nor checksum here, the transport is expected to provide them.
use super::payload::{TextPayload, PAYLOAD_LEN};
use super::Message;

const NODE_ID_AT: usize = 0;
const DEV_ID_AT: usize = 2;
const CMD_AT: usize = 4;
const INT_VAL_AT: usize = 6;
const FLT_VAL_AT: usize = 10;
const PAYLOAD_AT: usize = 14;

/// Encoded size of a [Message] in bytes.
pub const WIRE_SIZE: usize = PAYLOAD_AT + PAYLOAD_LEN;

impl Message {
    pub fn to_bytes(&self) -> [u8; WIRE_SIZE] {
        let mut bytes = [0u8; WIRE_SIZE];
        bytes[NODE_ID_AT..DEV_ID_AT].copy_from_slice(&self.node_id.to_le_bytes());
        bytes[DEV_ID_AT..CMD_AT].copy_from_slice(&self.dev_id.to_le_bytes());
        bytes[CMD_AT..INT_VAL_AT].copy_from_slice(&self.cmd.to_le_bytes());
        bytes[INT_VAL_AT..FLT_VAL_AT].copy_from_slice(&self.int_val.to_le_bytes());
        bytes[FLT_VAL_AT..PAYLOAD_AT].copy_from_slice(&self.flt_val.to_le_bytes());
        bytes[PAYLOAD_AT..WIRE_SIZE].copy_from_slice(self.payload.raw());
        bytes
    }

    /// Decodes a message from the head of `bytes`.
    ///
    /// Returns the message and the number of bytes read. Anything after the first
    /// [WIRE_SIZE] bytes is left to the caller.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, usize), WireError> {
        if bytes.len() < WIRE_SIZE {
            return Err(WireError::TooShort {
                len: bytes.len(),
                expected: WIRE_SIZE,
            });
        }
        let mut i16_raw = [0u8; 2];
        let mut i32_raw = [0u8; 4];

        i16_raw.copy_from_slice(&bytes[NODE_ID_AT..DEV_ID_AT]);
        let node_id = i16::from_le_bytes(i16_raw);
        i16_raw.copy_from_slice(&bytes[DEV_ID_AT..CMD_AT]);
        let dev_id = i16::from_le_bytes(i16_raw);
        i16_raw.copy_from_slice(&bytes[CMD_AT..INT_VAL_AT]);
        let cmd = i16::from_le_bytes(i16_raw);

        i32_raw.copy_from_slice(&bytes[INT_VAL_AT..FLT_VAL_AT]);
        let int_val = i32::from_le_bytes(i32_raw);
        i32_raw.copy_from_slice(&bytes[FLT_VAL_AT..PAYLOAD_AT]);
        let flt_val = f32::from_le_bytes(i32_raw);

        let mut payload_raw = [0u8; PAYLOAD_LEN];
        payload_raw.copy_from_slice(&bytes[PAYLOAD_AT..WIRE_SIZE]);

        Ok((
            Message {
                node_id,
                dev_id,
                cmd,
                int_val,
                flt_val,
                payload: TextPayload::from_raw(payload_raw),
            },
            WIRE_SIZE,
        ))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Message is too short to be decoded (is: {}B, expected: {}B)!", .len, .expected)]
    TooShort { len: usize, expected: usize },
}
