use std::fmt;

use log::trace;

use crate::message::Message;
use crate::DeviceId;

/// Behavior run when a [Device] is asked to read.
///
/// The hook may fill or rewrite the message in place, it is the caller's own message.
pub trait ReadHook {
    fn read(&mut self, message: &mut Message);
}

/// Behavior run when a [Device] is asked to write.
///
/// The message is only borrowed immutably, a write hook cannot alter it.
pub trait WriteHook {
    fn write(&mut self, message: &Message);
}

impl<F> ReadHook for F
where
    F: FnMut(&mut Message),
{
    fn read(&mut self, message: &mut Message) {
        self(message)
    }
}

impl<F> WriteHook for F
where
    F: FnMut(&Message),
{
    fn write(&mut self, message: &Message) {
        self(message)
    }
}

/// Read hook that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopRead;

/// Write hook that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopWrite;

impl ReadHook for NoopRead {
    fn read(&mut self, _message: &mut Message) {
        // NO-OP
    }
}

impl WriteHook for NoopWrite {
    fn write(&mut self, _message: &Message) {
        // NO-OP
    }
}

/// Peripheral attached to a node.
///
/// A device owns one read hook and one write hook for its whole lifetime. Hooks that
/// were not supplied at construction are [NoopRead] / [NoopWrite], so a device can
/// always be read from and written to.
pub struct Device {
    id: DeviceId,
    tx: bool,
    reader: Box<dyn ReadHook>,
    writer: Box<dyn WriteHook>,
}

impl Device {
    /// Device with no behavior, both hooks are no-ops.
    pub fn new(id: DeviceId, tx: bool) -> Self {
        Self::with_hooks(id, tx, NoopRead, NoopWrite)
    }

    /// Device with a read hook, writes are no-ops.
    pub fn with_reader(id: DeviceId, tx: bool, reader: impl ReadHook + 'static) -> Self {
        Self::with_hooks(id, tx, reader, NoopWrite)
    }

    pub fn with_hooks(
        id: DeviceId,
        tx: bool,
        reader: impl ReadHook + 'static,
        writer: impl WriteHook + 'static,
    ) -> Self {
        Self {
            id,
            tx,
            reader: Box::new(reader),
            writer: Box::new(writer),
        }
    }

    /// Identity of the device, fixed at construction.
    ///
    /// ```compile_fail
    /// let mut device = relay_node::Device::new(1, false);
    /// device.id = 2;
    /// ```
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Transmit (`true`) or receive (`false`) mode.
    pub fn is_tx(&self) -> bool {
        self.tx
    }

    pub fn set_tx(&mut self, tx: bool) {
        self.tx = tx;
    }

    /// Hands `message` to the read hook.
    pub fn read(&mut self, message: &mut Message) {
        trace!("Device {} read.", self.id);
        self.reader.read(message);
    }

    /// Hands `message` to the write hook.
    pub fn write(&mut self, message: &Message) {
        trace!("Device {} write.", self.id);
        self.writer.write(message);
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id)
            .field("tx", &self.tx)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn sample() -> Message {
        Message::new(2, 5, 0)
            .with_int(42)
            .with_float(3.5)
            .with_text("sample")
    }

    #[test]
    fn default_hooks_leave_message_untouched() {
        let mut device = Device::new(5, true);
        let mut msg = sample();
        device.read(&mut msg);
        device.write(&msg);
        assert_eq!(msg, sample());
    }

    #[test]
    fn reader_only_device_writes_nothing() {
        let reads = Rc::new(Cell::new(0));
        let reads_ = reads.clone();
        let mut device = Device::with_reader(7, false, move |msg: &mut Message| {
            reads_.set(reads_.get() + 1);
            msg.int_val = 1;
        });
        let mut msg = sample();
        device.write(&msg);
        assert_eq!(reads.get(), 0);
        assert_eq!(msg, sample());
        device.read(&mut msg);
        assert_eq!(reads.get(), 1);
        assert_eq!(msg.int_val, 1);
    }

    #[test]
    fn read_hook_receives_caller_message() {
        let seen = Rc::new(Cell::new(0usize));
        let seen_ = seen.clone();
        let mut device = Device::with_hooks(
            1,
            true,
            move |msg: &mut Message| seen_.set(msg as *mut Message as usize),
            NoopWrite,
        );
        let mut msg = sample();
        device.read(&mut msg);
        assert_eq!(seen.get(), &mut msg as *mut Message as usize);
    }

    #[test]
    fn write_hook_sees_message_once() {
        let written = Rc::new(RefCell::new(Vec::new()));
        let written_ = written.clone();
        let mut device = Device::with_hooks(1, true, NoopRead, move |msg: &Message| {
            written_.borrow_mut().push(msg.clone());
        });
        let msg = sample();
        device.write(&msg);
        assert_eq!(*written.borrow(), vec![sample()]);
    }

    #[test]
    fn write_hook_cannot_alter_caller_message() {
        let mut device = Device::with_hooks(1, true, NoopRead, |msg: &Message| {
            // Only a copy can be changed through a shared borrow.
            let mut copy = msg.clone();
            copy.int_val = -1;
            copy.payload.clear();
        });
        let msg = sample();
        device.write(&msg);
        assert_eq!(msg, sample());
    }

    #[test]
    fn struct_hooks() {
        struct Counter(u32);
        impl ReadHook for Counter {
            fn read(&mut self, message: &mut Message) {
                self.0 += 1;
                message.int_val = self.0 as i32;
            }
        }
        let mut device = Device::with_reader(3, false, Counter(0));
        let mut msg = Message::default();
        device.read(&mut msg);
        device.read(&mut msg);
        assert_eq!(msg.int_val, 2);
    }

    #[test]
    fn tx_flag_is_mutable() {
        let mut device = Device::new(9, false);
        assert_eq!(device.id(), 9);
        assert!(!device.is_tx());
        device.set_tx(true);
        assert!(device.is_tx());
        assert_eq!(device.id(), 9);
    }

    #[test]
    fn debug_shows_identity() {
        let device = Device::new(4, true);
        assert_eq!(format!("{:?}", device), "Device { id: 4, tx: true, .. }");
    }
}
