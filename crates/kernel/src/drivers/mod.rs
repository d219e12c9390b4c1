//! Device drivers: trait abstractions for hardware devices and the disk
//! driver base built on top of them.

pub mod char;
pub mod disk;
pub mod traits;

#[cfg(feature = "mock-devices")]
pub mod mock;
