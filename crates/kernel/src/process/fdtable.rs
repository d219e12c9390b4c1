//! Per-process descriptor table: maps small integers to open [`File`]s.
//! `open` allocates the lowest free slot; `close`/`dup`/process exit
//! release it. Every syscall that takes a file descriptor indexes through
//! this table before touching the underlying file.

use crate::lib::error::{KResult, KernelError};
use crate::vfs::File;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

const DEFAULT_SLOTS: usize = 256;

pub struct FdTable {
    slots: Vec<Option<Arc<File>>>,
}

impl FdTable {
    pub fn new() -> Self {
        Self { slots: vec![None; DEFAULT_SLOTS] }
    }

    /// Allocate the lowest free descriptor for `file`.
    pub fn alloc(&mut self, file: Arc<File>) -> KResult<i32> {
        if let Some((fd, slot)) = self.slots.iter_mut().enumerate().find(|(_, s)| s.is_none()) {
            *slot = Some(file);
            return Ok(fd as i32);
        }
        Err(KernelError::NotSupported)
    }

    pub fn get(&self, fd: i32) -> KResult<Arc<File>> {
        self.slot(fd)?.clone().ok_or(KernelError::BadDescriptor)
    }

    /// Release `fd`, dropping the table's reference to the underlying file.
    pub fn close(&mut self, fd: i32) -> KResult<()> {
        let slot = self.slot_mut(fd)?;
        match slot.take() {
            Some(_) => Ok(()),
            None => Err(KernelError::BadDescriptor),
        }
    }

    /// Duplicate `oldfd` onto the lowest free descriptor (`dup`).
    pub fn dup(&mut self, oldfd: i32) -> KResult<i32> {
        let file = self.get(oldfd)?;
        self.alloc(file)
    }

    /// Duplicate `oldfd` onto `newfd` exactly, closing whatever `newfd`
    /// previously held (`dup2`).
    pub fn dup_onto(&mut self, oldfd: i32, newfd: i32) -> KResult<i32> {
        if oldfd == newfd {
            self.get(oldfd)?;
            return Ok(newfd);
        }
        let file = self.get(oldfd)?;
        let slot = self.slot_mut(newfd)?;
        slot.replace(file);
        Ok(newfd)
    }

    /// Release every open descriptor, called on process exit.
    pub fn close_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.take();
        }
    }

    /// Clone the table for `fork`: every open descriptor shares the same
    /// underlying file description with the parent, per POSIX semantics
    /// (the offset advances for both sides after fork).
    pub fn fork(&self) -> Self {
        let slots = self.slots.iter().map(|slot| slot.clone()).collect();
        Self { slots }
    }

    fn slot(&self, fd: i32) -> KResult<&Option<Arc<File>>> {
        if fd < 0 {
            return Err(KernelError::BadDescriptor);
        }
        self.slots.get(fd as usize).ok_or(KernelError::BadDescriptor)
    }

    fn slot_mut(&mut self, fd: i32) -> KResult<&mut Option<Arc<File>>> {
        if fd < 0 {
            return Err(KernelError::BadDescriptor);
        }
        self.slots.get_mut(fd as usize).ok_or(KernelError::BadDescriptor)
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::{InodeType, OpenFlags};
    use crate::vfs::tmpfs::TmpfsFile;

    fn file() -> Arc<File> {
        let ops: &'static TmpfsFile = alloc::boxed::Box::leak(alloc::boxed::Box::new(TmpfsFile::new(0o644)));
        let inode = Arc::new(crate::vfs::Inode::new(InodeType::Regular, 0o644, ops));
        Arc::new(File::new(inode, OpenFlags::O_RDWR))
    }

    #[test]
    fn alloc_picks_lowest_free_slot() {
        let mut t = FdTable::new();
        assert_eq!(t.alloc(file()).unwrap(), 0);
        assert_eq!(t.alloc(file()).unwrap(), 1);
        t.close(0).unwrap();
        assert_eq!(t.alloc(file()).unwrap(), 0);
    }

    #[test]
    fn get_on_closed_fd_is_bad_descriptor() {
        let mut t = FdTable::new();
        let fd = t.alloc(file()).unwrap();
        t.close(fd).unwrap();
        assert_eq!(t.get(fd).unwrap_err(), KernelError::BadDescriptor);
    }

    #[test]
    fn dup_onto_closes_previous_occupant() {
        let mut t = FdTable::new();
        let a = t.alloc(file()).unwrap();
        let b = t.alloc(file()).unwrap();
        t.dup_onto(a, b).unwrap();
        assert!(Arc::ptr_eq(&t.get(a).unwrap(), &t.get(b).unwrap()));
    }
}
