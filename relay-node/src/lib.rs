//! Message record and hook-driven device abstraction for a radio relay end node.
//!
//! A [Message](message::Message) is the flat packet exchanged between nodes, a
//! [Device](device::Device) forwards reads and writes of such messages to the hooks it
//! was built with, and a [Node](node::Node) routes inbound messages to its devices.

pub mod device;
pub mod message;
pub mod node;

pub use device::{Device, NoopRead, NoopWrite, ReadHook, WriteHook};
pub use message::{Message, TextPayload, PAYLOAD_LEN, WIRE_SIZE};
pub use node::{Command, Node, NodeError};

/// Identifier of a node on the radio network.
pub type NodeId = i16;

/// Identifier of a device attached to a node.
pub type DeviceId = i16;

/// Raw operation code carried by a [Message].
pub type CommandCode = i16;
