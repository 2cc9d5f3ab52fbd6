use relay_node::message::WIRE_SIZE;
use relay_node::{DeviceId, Message, Node, NodeError, ReadHook};

use log::{info, warn};
use std::cell::Cell;
use std::rc::Rc;

/// A basic relay server: decodes each inbound packet, hands it to the node and
/// prints the reply.
pub struct RelayServer {
    pub node: Node,
}

impl RelayServer {
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// Serves every packet of `inbound`, returns how many were accepted by the node.
    ///
    /// Rejected packets are reported and skipped; only a malformed packet aborts.
    pub fn serve<I>(&mut self, inbound: I) -> anyhow::Result<usize>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut handled = 0;
        for packet in inbound {
            match self.node.dispatch_bytes(&packet) {
                Ok(reply) => {
                    handled += 1;
                    self.report(&reply)?;
                }
                Err(err @ NodeError::Wire(_)) => return Err(err.into()),
                Err(err) => warn!("Packet rejected: {}", err),
            }
        }
        Ok(handled)
    }

    fn report(&self, reply: &[u8; WIRE_SIZE]) -> anyhow::Result<()> {
        let (msg, _) = Message::try_from_bytes(reply)?;
        info!("Reply for device {} (cmd {}).", msg.dev_id, msg.cmd);
        println!(
            "node {} dev {} cmd {}: int={} flt={} text={:?}",
            msg.node_id, msg.dev_id, msg.cmd, msg.int_val, msg.flt_val, msg.payload.to_string()
        );
        Ok(())
    }
}

/// In-memory relay, shared between the device hooks and the caller.
#[derive(Clone)]
pub struct SimulatedRelay {
    id: DeviceId,
    state: Rc<Cell<bool>>,
}

impl SimulatedRelay {
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            state: Rc::new(Cell::new(false)),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn is_on(&self) -> bool {
        self.state.get()
    }

    pub fn reader(&self) -> impl FnMut(&mut Message) + 'static {
        let state = self.state.clone();
        move |msg: &mut Message| {
            let label = if state.get() { "on" } else { "off" };
            msg.int_val = state.get() as i32;
            msg.payload = label.try_into().unwrap_or_default();
        }
    }

    pub fn writer(&self) -> impl FnMut(&Message) + 'static {
        let state = self.state.clone();
        let id = self.id;
        move |msg: &Message| {
            state.set(msg.int_val != 0);
            info!("Relay {} switched {}.", id, if state.get() { "on" } else { "off" });
        }
    }
}

/// Thermometer drifting by `step` degrees on every reading.
pub struct SimulatedSensor {
    celsius: f32,
    step: f32,
}

impl SimulatedSensor {
    pub fn new(celsius: f32, step: f32) -> Self {
        Self { celsius, step }
    }
}

impl ReadHook for SimulatedSensor {
    fn read(&mut self, message: &mut Message) {
        message.flt_val = self.celsius;
        message.payload = "celsius".try_into().unwrap_or_default();
        self.celsius += self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_node::{Command, Device};

    #[test]
    fn serve_skips_rejected_packets() {
        let relay = SimulatedRelay::new(1);
        let mut node = Node::new(7);
        node.add_device(Device::with_hooks(1, false, relay.reader(), relay.writer()))
            .unwrap();
        let mut server = RelayServer::new(node);

        let inbound = vec![
            Message::new(7, 1, Command::Write.into()).with_int(1).to_bytes().to_vec(),
            Message::new(7, 2, Command::Read.into()).to_bytes().to_vec(),
            Message::new(8, 1, Command::Read.into()).to_bytes().to_vec(),
        ];
        assert_eq!(server.serve(inbound).unwrap(), 1);
        assert!(relay.is_on());
    }

    #[test]
    fn serve_aborts_on_malformed_packet() {
        let mut server = RelayServer::new(Node::new(7));
        assert!(server.serve(vec![vec![0u8; 3]]).is_err());
    }

    #[test]
    fn sensor_drifts() {
        let mut sensor = SimulatedSensor::new(20.0, 0.5);
        let mut msg = Message::default();
        sensor.read(&mut msg);
        assert_eq!(msg.flt_val, 20.0);
        sensor.read(&mut msg);
        assert_eq!(msg.flt_val, 20.5);
        assert_eq!(msg.payload.to_string(), "celsius");
    }
}
