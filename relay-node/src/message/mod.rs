//! Radio packet format shared by every node.

pub mod payload;
pub mod wire;

pub use payload::{PayloadError, TextPayload, PAYLOAD_LEN};
pub use wire::{WireError, WIRE_SIZE};

use crate::{CommandCode, DeviceId, NodeId};

/// Point-to-point radio packet.
///
/// All fields are plain values; nothing is validated. The addressing fields
/// (`node_id`, `dev_id`, `cmd`) are followed by the payload fields (`int_val`,
/// `flt_val`, `payload`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    /// Originating or destination node.
    pub node_id: NodeId,
    /// Target device on that node.
    pub dev_id: DeviceId,
    /// Operation code, see [Command](crate::node::Command).
    pub cmd: CommandCode,
    /// Integer payload.
    pub int_val: i32,
    /// Floating payload.
    pub flt_val: f32,
    /// Text payload.
    pub payload: TextPayload,
}

impl Message {
    /// Builds a message with an empty payload.
    pub fn new(node_id: NodeId, dev_id: DeviceId, cmd: CommandCode) -> Self {
        Self {
            node_id,
            dev_id,
            cmd,
            ..Default::default()
        }
    }

    pub fn with_int(mut self, value: i32) -> Self {
        self.int_val = value;
        self
    }

    pub fn with_float(mut self, value: f32) -> Self {
        self.flt_val = value;
        self
    }

    /// Sets the text payload, truncating it to [PAYLOAD_LEN] bytes.
    pub fn with_text(mut self, text: &str) -> Self {
        self.payload = TextPayload::truncated(text);
        self
    }
}
