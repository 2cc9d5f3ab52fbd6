//! Hooks driving and sampling digital pins.
//!
//! ```rust,ignore
//! let relay = Device::with_hooks(2, false, NoopRead, RelayWriter::new(coil_pin));
//! let contact = Device::with_reader(3, true, PinReader::new(contact_pin));
//! ```
use std::fmt::Debug;

use embedded_hal::digital::v2::{InputPin, OutputPin};
use log::warn;

use super::device::{ReadHook, WriteHook};
use crate::message::Message;

/// Write hook switching a relay: a non-zero `int_val` drives the pin high, zero drives it low.
///
/// A pin error is logged and dropped, the device never sees it.
pub struct RelayWriter<P> {
    pin: P,
}

impl<P> RelayWriter<P>
where
    P: OutputPin,
    P::Error: Debug,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> WriteHook for RelayWriter<P>
where
    P: OutputPin,
    P::Error: Debug,
{
    fn write(&mut self, message: &Message) {
        let res = if message.int_val != 0 {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(err) = res {
            warn!(
                "Relay of device {} could not be switched: {:?}",
                message.dev_id, err
            );
        }
    }
}

/// Read hook sampling an input pin into `int_val`: `1` when high, `0` when low.
///
/// On a pin error `int_val` keeps its previous value.
pub struct PinReader<P> {
    pin: P,
}

impl<P> PinReader<P>
where
    P: InputPin,
    P::Error: Debug,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> ReadHook for PinReader<P>
where
    P: InputPin,
    P::Error: Debug,
{
    fn read(&mut self, message: &mut Message) {
        match self.pin.is_high() {
            Ok(high) => message.int_val = high as i32,
            Err(err) => warn!(
                "Input of device {} could not be sampled: {:?}",
                message.dev_id, err
            ),
        }
    }
}
