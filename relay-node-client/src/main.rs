use anyhow::{anyhow, Context, Result};

use relay_node::{Command, Device, Message, Node, NoopRead};

mod relay_server;

use relay_server::{RelayServer, SimulatedRelay, SimulatedSensor};

/// Devices of the demo node: (device id, tx mode, kind).
const DEVICES: [(i16, bool, DeviceKind); 3] = [
    (1, false, DeviceKind::Relay),
    (2, false, DeviceKind::Relay),
    (3, true, DeviceKind::Thermometer),
];

const DEFAULT_NODE_ID: i16 = 1;

#[derive(Copy, Clone, Debug)]
enum DeviceKind {
    Relay,
    Thermometer,
}

fn main() -> Result<()> {
    env_logger::init();

    let node_id = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<i16>()
            .with_context(|| format!("Invalid node id: {}", arg))?,
        None => DEFAULT_NODE_ID,
    };
    log::info!("Starting relay end node {}.", node_id);

    let mut node = Node::new(node_id);
    let mut relays = Vec::new();
    for (id, tx, kind) in DEVICES {
        let device = match kind {
            DeviceKind::Relay => {
                let relay = SimulatedRelay::new(id);
                relays.push(relay.clone());
                Device::with_hooks(id, tx, relay.reader(), relay.writer())
            }
            DeviceKind::Thermometer => {
                Device::with_hooks(id, tx, SimulatedSensor::new(18.0, 0.5), |_: &Message| {})
            }
        };
        node.add_device(device)?;
    }
    // A device with nothing wired yet still answers, with an untouched message.
    node.add_device(Device::with_hooks(4, false, NoopRead, |_: &Message| {}))?;
    for device in node.devices() {
        log::debug!("Attached {:?}.", device);
    }

    let requests = vec![
        Message::new(node_id, 1, Command::Write.into()).with_int(1),
        Message::new(node_id, 1, Command::Read.into()),
        Message::new(node_id, 2, Command::Read.into()),
        Message::new(node_id, 3, Command::Read.into()),
        Message::new(node_id, 3, Command::Read.into()),
        Message::new(node_id, 4, Command::Read.into()).with_text("ping"),
        Message::new(node_id, 9, Command::Read.into()),
        Message::new(node_id.wrapping_add(1), 1, Command::Write.into()).with_int(0),
        Message::new(node_id, 1, 42),
        Message::new(node_id, 1, Command::Write.into()).with_int(0),
    ];

    let mut server = RelayServer::new(node);
    let handled = server
        .serve(requests.iter().map(|msg| msg.to_bytes().to_vec()))
        .map_err(|err| anyhow!("Relay server error!\ncause: {:?}", err))?;

    for relay in &relays {
        println!("Relay {} is {}.", relay.id(), if relay.is_on() { "on" } else { "off" });
    }
    println!("Handled {}/{} requests.", handled, requests.len());

    Ok(())
}
