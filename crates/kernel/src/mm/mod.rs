//! Memory management: boot-time RAM discovery, a top-down bump allocator
//! for the period before the heap exists, and the kernel heap itself.
//!
//! Paged, on-demand virtual memory is out of scope for this kernel — there
//! is no page table management here, only physical extent bookkeeping.

pub mod probe;
pub mod boot_allocator;
pub mod heap;

pub use probe::{MemoryDescriptor, MemoryKind, ProbeIo};
pub use boot_allocator::{BootAllocator, PAGE_SIZE};
