//! Blocking synchronization primitives: a wait queue of descheduled vCPUs,
//! a mutex built from one, and a condition variable that splices its
//! waiters onto a mutex's queue on broadcast.

pub mod waitqueue;
pub mod mutex;
pub mod condvar;

pub use condvar::Condvar;
pub use mutex::Mutex;
pub use waitqueue::{WaitQueue, WaitResult, WakePolicy};
