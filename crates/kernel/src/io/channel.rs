//! I/O channel: the base type every openable kernel object (disk, pipe,
//! catalog entry) is built on. Handles open-mode gating, the owner/use
//! refcount pair, and the serialized read/write/seek trio; subclasses
//! supply the actual transfer via [`ChannelOps`].

use crate::kobj::object::{self, ObjectHeader};
use crate::lib::error::{KernelError, KResult};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use spin::Mutex;

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct OpenMode: u32 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// Where to seek from, mirroring `lseek`'s whence argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    Current(i64),
    End(i64),
}

/// Operations a channel subclass provides. All three take the channel's
/// current offset and return the new one alongside the transfer result, so
/// [`Channel`] can update `offset` under its own lock without the subclass
/// needing to know about it.
pub trait ChannelOps: Send + Sync {
    fn read(&self, offset: u64, buf: &mut [u8]) -> KResult<usize>;
    fn write(&self, offset: u64, buf: &[u8]) -> KResult<usize>;
    /// `None` means this channel is not seekable at all.
    fn seekable(&self) -> bool {
        true
    }
    fn size(&self) -> Option<u64> {
        None
    }
    /// Runs once, when the last use-reference drops after the channel was
    /// already marked invisible. Errors here are informational: the
    /// channel is freed regardless.
    fn finalize(&self) -> KResult<()> {
        Ok(())
    }
}

/// How `close` behaves when the last owner reference drops. This kernel
/// only implements `Deferred`, the spec-mandated mode; the other two are
/// named so callers reading this code understand why `close` doesn't
/// simply free the channel immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    Deferred,
}

struct Offset(Mutex<u64>);

pub struct Channel {
    header: ObjectHeader,
    mode: OpenMode,
    ops: Arc<dyn ChannelOps>,
    offset: Offset,
    owners: AtomicIsize,
    uses: AtomicIsize,
    invisible: AtomicBool,
}

unsafe impl object::Object for Channel {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl Channel {
    pub fn new(class: &'static crate::kobj::class::Class, mode: OpenMode, ops: Arc<dyn ChannelOps>) -> Self {
        Self {
            header: ObjectHeader::new(class),
            mode,
            ops,
            offset: Offset(Mutex::new(0)),
            owners: AtomicIsize::new(1),
            uses: AtomicIsize::new(0),
            invisible: AtomicBool::new(false),
        }
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    fn begin_use(&self) {
        self.uses.fetch_add(1, Ordering::AcqRel);
    }

    fn end_use(&self) {
        let prev = self.uses.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev >= 1, "channel use refcount underflow");
        if prev == 1 && self.invisible.load(Ordering::Acquire) {
            let _ = self.ops.finalize();
        }
    }

    /// Drop an owner reference (e.g. a descriptor table entry closing).
    /// Per the spec's deferred close mode, this only marks the channel
    /// invisible; finalization waits for the last in-flight use to finish.
    pub fn close_owner(&self) {
        let prev = self.owners.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev >= 1, "channel owner refcount underflow");
        if prev == 1 {
            self.invisible.store(true, Ordering::Release);
            if self.uses.load(Ordering::Acquire) == 0 {
                let _ = self.ops.finalize();
            }
        }
    }

    pub fn add_owner(&self) {
        self.owners.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_visible(&self) -> bool {
        !self.invisible.load(Ordering::Acquire)
    }

    pub fn read(&self, buf: &mut [u8]) -> KResult<usize> {
        if !self.mode.contains(OpenMode::READ) {
            return Err(KernelError::BadDescriptor);
        }
        self.begin_use();
        let result = (|| {
            let mut offset = self.offset.0.lock();
            let n = self.ops.read(*offset, buf)?;
            *offset += n as u64;
            Ok(n)
        })();
        self.end_use();
        result
    }

    pub fn write(&self, buf: &[u8]) -> KResult<usize> {
        if !self.mode.contains(OpenMode::WRITE) {
            return Err(KernelError::BadDescriptor);
        }
        self.begin_use();
        let result = (|| {
            let mut offset = self.offset.0.lock();
            let n = self.ops.write(*offset, buf)?;
            *offset += n as u64;
            Ok(n)
        })();
        self.end_use();
        result
    }

    pub fn seek(&self, from: SeekFrom) -> KResult<u64> {
        if !self.ops.seekable() {
            return Err(KernelError::NotSeekable);
        }
        self.begin_use();
        let result = (|| {
            let mut offset = self.offset.0.lock();
            let new_offset = match from {
                SeekFrom::Start(n) => n,
                SeekFrom::Current(delta) => apply_signed(*offset, delta)?,
                SeekFrom::End(delta) => {
                    let size = self.ops.size().ok_or(KernelError::NotSeekable)?;
                    apply_signed(size, delta)?
                }
            };
            *offset = new_offset;
            Ok(new_offset)
        })();
        self.end_use();
        result
    }
}

fn apply_signed(base: u64, delta: i64) -> KResult<u64> {
    if delta >= 0 {
        base.checked_add(delta as u64).ok_or(KernelError::Overflow)
    } else {
        base.checked_sub((-delta) as u64).ok_or(KernelError::InvalidArg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    struct MemOps(Mutex<Vec<u8>>);
    impl ChannelOps for MemOps {
        fn read(&self, offset: u64, buf: &mut [u8]) -> KResult<usize> {
            let data = self.0.lock();
            let offset = offset as usize;
            if offset >= data.len() {
                return Ok(0);
            }
            let n = core::cmp::min(buf.len(), data.len() - offset);
            buf[..n].copy_from_slice(&data[offset..offset + n]);
            Ok(n)
        }
        fn write(&self, offset: u64, buf: &[u8]) -> KResult<usize> {
            let mut data = self.0.lock();
            let offset = offset as usize;
            if data.len() < offset + buf.len() {
                data.resize(offset + buf.len(), 0);
            }
            data[offset..offset + buf.len()].copy_from_slice(buf);
            Ok(buf.len())
        }
        fn size(&self) -> Option<u64> {
            Some(self.0.lock().len() as u64)
        }
    }

    lazy_static::lazy_static! {
        static ref TEST_CLASS: crate::kobj::class::Class =
            crate::kobj::class::ClassBuilder::new("test-channel", 0, &[]).build(&[]);
    }

    fn channel(mode: OpenMode) -> Channel {
        Channel::new(&TEST_CLASS, mode, Arc::new(MemOps(Mutex::new(vec![1, 2, 3, 4]))))
    }

    #[test]
    fn read_without_read_mode_is_bad_descriptor() {
        let c = channel(OpenMode::WRITE);
        let mut buf = [0u8; 4];
        assert_eq!(c.read(&mut buf), Err(KernelError::BadDescriptor));
    }

    #[test]
    fn read_write_advance_a_shared_offset() {
        let c = channel(OpenMode::READ | OpenMode::WRITE);
        let mut buf = [0u8; 2];
        assert_eq!(c.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(c.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [3, 4]);
    }

    #[test]
    fn seek_end_then_read_returns_zero_at_eof() {
        let c = channel(OpenMode::READ);
        c.seek(SeekFrom::End(0)).unwrap();
        let mut buf = [0u8; 1];
        assert_eq!(c.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn close_owner_marks_invisible_and_finalizes_once_uses_drain() {
        let c = channel(OpenMode::READ);
        assert!(c.is_visible());
        c.close_owner();
        assert!(!c.is_visible());
    }
}
