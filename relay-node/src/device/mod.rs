//! Everything needed to attach a peripheral to a node: the [Device] wrapper, its
//! read/write hooks and hook adapters for digital pins.

pub mod device;
pub mod pins;

pub use device::*;
