//! Disk driver base: synchronous `get_info`/`get_block`/`put_block` that
//! package their arguments into a request and dispatch it onto the
//! driver's own serializing queue, where the asynchronous variant —
//! the one subclasses actually override — does the real transfer.
//!
//! A block is a fixed-size, power-of-two unit. Reads never return partial
//! blocks; a failed write leaves the on-disk block in an unspecified mix
//! of old and new data, same as the underlying [`BlockDevice`].

use super::traits::BlockDevice;
use crate::lib::error::{KernelError, KResult};
use alloc::sync::Arc;

/// Static information about a disk, returned by `get_info`.
#[derive(Debug, Clone, Copy)]
pub struct DiskInfo {
    pub block_size: usize,
    pub block_count: u64,
    pub read_only: bool,
}

/// What a dispatched request produced. [`DispatchQueue::dispatch`] runs a
/// closure rather than taking a request enum, since the borrowed buffer in
/// `get_block`/`put_block` makes an owned request type awkward to build.
enum Response {
    Info(DiskInfo),
    Done,
}

/// The driver's own dispatch queue, abstracted so this module doesn't
/// depend on a particular executor: the real implementation serializes
/// requests through the kernel's dispatch-queue runtime; the `Inline`
/// implementation below (used in tests and for drivers with no need for
/// cross-thread dispatch) runs the request synchronously in place.
pub trait DispatchQueue {
    fn dispatch(&self, run: &mut dyn FnMut() -> Response) -> Response;
}

pub struct Inline;
impl DispatchQueue for Inline {
    fn dispatch(&self, run: &mut dyn FnMut() -> Response) -> Response {
        run()
    }
}

/// Power-of-two block size check, asserted once at construction — every
/// transfer after that can assume it holds.
fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

pub struct Disk<Q: DispatchQueue> {
    device: Arc<dyn BlockDevice>,
    queue: Q,
}

impl<Q: DispatchQueue> Disk<Q> {
    pub fn new(device: Arc<dyn BlockDevice>, queue: Q) -> Self {
        assert!(is_power_of_two(device.block_size()), "disk block size must be a power of two");
        Self { device, queue }
    }

    /// Synchronous `get_info`: packages the request and dispatches onto
    /// the driver's own queue, blocking the caller until it completes.
    pub fn get_info(&self) -> DiskInfo {
        let device = &self.device;
        let mut run = || Response::Info(DiskInfo {
            block_size: device.block_size(),
            block_count: device.block_count(),
            read_only: device.is_readonly(),
        });
        match self.queue.dispatch(&mut run) {
            Response::Info(info) => info,
            Response::Done => unreachable!("get_info always returns Info"),
        }
    }

    /// Synchronous `get_block`: `buf` must be exactly one block long.
    pub fn get_block(&self, block: u64, buf: &mut [u8]) -> KResult<()> {
        if buf.len() != self.device.block_size() {
            return Err(KernelError::InvalidArg);
        }
        if block >= self.device.block_count() {
            return Err(KernelError::InvalidArg);
        }
        let device = &self.device;
        let result = core::cell::RefCell::new(Ok(()));
        let mut run = || {
            *result.borrow_mut() = device.read(block, buf).map_err(map_errno);
            Response::Done
        };
        self.queue.dispatch(&mut run);
        result.into_inner()
    }

    /// Synchronous `put_block`: `buf` must be exactly one block long.
    pub fn put_block(&self, block: u64, buf: &[u8]) -> KResult<()> {
        if buf.len() != self.device.block_size() {
            return Err(KernelError::InvalidArg);
        }
        if self.device.is_readonly() {
            return Err(KernelError::PermissionDenied);
        }
        if block >= self.device.block_count() {
            return Err(KernelError::InvalidArg);
        }
        let device = &self.device;
        let result = core::cell::RefCell::new(Ok(()));
        let mut run = || {
            *result.borrow_mut() = device.write(block, buf).map_err(map_errno);
            Response::Done
        };
        self.queue.dispatch(&mut run);
        result.into_inner()
    }
}

fn map_errno(e: crate::lib::error::Errno) -> KernelError {
    use crate::lib::error::Errno;
    match e {
        Errno::ENOMEM => KernelError::OutOfMemory,
        Errno::EINVAL => KernelError::InvalidArg,
        Errno::ENOENT => KernelError::NotFound,
        Errno::EACCES | Errno::EPERM => KernelError::PermissionDenied,
        Errno::EIO => KernelError::IoError,
        Errno::EBUSY => KernelError::Busy,
        Errno::ENOSYS => KernelError::NotSupported,
        Errno::ENODEV => KernelError::NoMedium,
        _ => KernelError::IoError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mock::block::MockBlockDevice;

    fn disk() -> Disk<Inline> {
        let dev = Arc::new(MockBlockDevice::new("test", 512 * 16, 512));
        Disk::new(dev, Inline)
    }

    #[test]
    fn get_info_reports_device_geometry() {
        let d = disk();
        let info = d.get_info();
        assert_eq!(info.block_size, 512);
        assert_eq!(info.block_count, 16);
    }

    #[test]
    fn put_then_get_block_round_trips() {
        let d = disk();
        let mut buf = [7u8; 512];
        d.put_block(0, &buf).unwrap();
        let mut out = [0u8; 512];
        d.get_block(0, &mut out).unwrap();
        assert_eq!(&out[..], &buf[..]);
        let _ = &mut buf;
    }

    #[test]
    fn wrong_size_buffer_is_invalid_arg() {
        let d = disk();
        let mut small = [0u8; 4];
        assert_eq!(d.get_block(0, &mut small), Err(KernelError::InvalidArg));
    }

    #[test]
    fn out_of_range_block_is_invalid_arg() {
        let d = disk();
        let mut buf = [0u8; 512];
        assert_eq!(d.get_block(999, &mut buf), Err(KernelError::InvalidArg));
    }
}
