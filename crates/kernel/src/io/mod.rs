//! Channel-based I/O: the open-mode-gated, refcounted channel base type and
//! the pipe built on top of it.

pub mod channel;
pub mod pipe;

pub use channel::{Channel, ChannelOps, CloseMode, OpenMode, SeekFrom};
pub use pipe::Pipe;
