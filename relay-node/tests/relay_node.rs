use relay_node::{Command, Device, Message, Node, NodeError, NoopRead, WIRE_SIZE};

use std::cell::RefCell;
use std::rc::Rc;

fn arbitrary_message() -> Message {
    Message::new(5, 5, 1)
        .with_int(123_456)
        .with_float(-0.25)
        .with_text("arbitrary")
}

#[test]
fn device_without_hooks_is_inert() {
    let mut d = Device::new(5, true);
    let mut m = arbitrary_message();
    d.read(&mut m);
    d.write(&m);
    assert_eq!(m, arbitrary_message());
    assert_eq!(d.id(), 5);
    assert!(d.is_tx());
}

#[test]
fn read_hook_observes_caller_message() {
    let observed = Rc::new(RefCell::new(Vec::new()));
    let observed_ = observed.clone();
    let mut d = Device::with_reader(7, false, move |m: &mut Message| {
        observed_.borrow_mut().push(m.clone());
    });
    let mut m = arbitrary_message();
    d.read(&mut m);
    assert_eq!(*observed.borrow(), vec![arbitrary_message()]);
    // The write hook was never supplied, writing does nothing.
    d.write(&m);
    assert_eq!(observed.borrow().len(), 1);
}

#[test]
fn read_hook_mutations_are_visible() {
    let mut d = Device::with_reader(7, false, |m: &mut Message| {
        m.int_val += 1;
        m.payload = "updated".try_into().unwrap();
    });
    let mut m = arbitrary_message();
    d.read(&mut m);
    assert_eq!(m.int_val, 123_457);
    assert_eq!(m.payload.to_string(), "updated");
}

#[test]
fn relay_node_over_the_wire() {
    let relay_state = Rc::new(RefCell::new(false));
    let relay_state_ = relay_state.clone();
    let relay_state__ = relay_state.clone();

    let mut node = Node::new(12);
    node.add_device(Device::with_hooks(
        1,
        false,
        move |m: &mut Message| m.int_val = *relay_state_.borrow() as i32,
        move |m: &Message| *relay_state__.borrow_mut() = m.int_val != 0,
    ))
    .unwrap();
    node.add_device(Device::with_hooks(2, true, NoopRead, |_: &Message| {}))
        .unwrap();
    assert_eq!(node.len(), 2);

    let switch_on = Message::new(12, 1, Command::Write.into()).with_int(1);
    let echo = node.dispatch_bytes(&switch_on.to_bytes()).unwrap();
    assert_eq!(echo, switch_on.to_bytes());
    assert!(*relay_state.borrow());

    let query = Message::new(12, 1, Command::Read.into());
    let reply = node.dispatch_bytes(&query.to_bytes()).unwrap();
    let (reply, read) = Message::try_from_bytes(&reply).unwrap();
    assert_eq!(read, WIRE_SIZE);
    assert_eq!(reply.int_val, 1);

    let stray = Message::new(13, 1, Command::Read.into());
    assert_eq!(
        node.dispatch_bytes(&stray.to_bytes()),
        Err(NodeError::WrongNode { expected: 12, got: 13 })
    );
}
