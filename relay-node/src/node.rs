//! Routing of inbound messages to the devices of a node.
use log::{debug, warn};

use crate::device::Device;
use crate::message::{Message, WireError, WIRE_SIZE};
use crate::{CommandCode, DeviceId, NodeId};

/// Operation requested by a [Message], decoded from its `cmd` field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(i16)]
pub enum Command {
    /// Read the device, the message is filled in and becomes the reply.
    Read = 0,
    /// Write the message to the device.
    Write = 1,
}

impl TryFrom<CommandCode> for Command {
    type Error = NodeError;

    fn try_from(code: CommandCode) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Command::Read),
            1 => Ok(Command::Write),
            n => Err(NodeError::UnknownCommand(n)),
        }
    }
}

impl From<Command> for CommandCode {
    fn from(cmd: Command) -> Self {
        cmd as CommandCode
    }
}

/// A radio node and the devices attached to it.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    devices: Vec<Device>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            devices: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Attaches a device. Device ids are unique on a node.
    pub fn add_device(&mut self, device: Device) -> Result<(), NodeError> {
        if self.device(device.id()).is_some() {
            return Err(NodeError::DuplicateDevice(device.id()));
        }
        self.devices.push(device);
        Ok(())
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|dev| dev.id() == id)
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|dev| dev.id() == id)
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Routes `message` to the device it addresses and runs the requested command.
    ///
    /// On [Command::Read] the message is handed mutably to the read hook, so once this
    /// returns it holds the reply.
    pub fn dispatch(&mut self, message: &mut Message) -> Result<Command, NodeError> {
        if message.node_id != self.id {
            warn!(
                "Message ignored: addressed to node {}, we are node {}.",
                message.node_id, self.id
            );
            return Err(NodeError::WrongNode {
                expected: self.id,
                got: message.node_id,
            });
        }
        let dev_id = message.dev_id;
        let device = match self.device_mut(dev_id) {
            Some(device) => device,
            None => {
                warn!("Message ignored: no device {} on this node.", dev_id);
                return Err(NodeError::UnknownDevice(dev_id));
            }
        };
        let cmd = Command::try_from(message.cmd).map_err(|err| {
            warn!("Message ignored: unknown command {}.", message.cmd);
            err
        })?;
        debug!("Dispatching {:?} to device {}.", cmd, dev_id);
        match cmd {
            Command::Read => device.read(message),
            Command::Write => device.write(message),
        }
        Ok(cmd)
    }

    /// Decodes a message, dispatches it and encodes it back.
    ///
    /// The returned bytes are the reply for a read and an echo of the request for a write.
    pub fn dispatch_bytes(&mut self, bytes: &[u8]) -> Result<[u8; WIRE_SIZE], NodeError> {
        let (mut message, _read) = Message::try_from_bytes(bytes)?;
        self.dispatch(&mut message)?;
        Ok(message.to_bytes())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Message addressed to another node (expected: {}, got: {})!", .expected, .got)]
    WrongNode { expected: NodeId, got: NodeId },

    #[error("No device {} on this node.", .0)]
    UnknownDevice(DeviceId),

    #[error("A device {} is already attached to this node.", .0)]
    DuplicateDevice(DeviceId),

    #[error("Unknown command code {}.", .0)]
    UnknownCommand(CommandCode),

    #[error("Bad message encoding.")]
    Wire(#[from] WireError),
}
