//! Process task structure: per-process state for scheduling, the address
//! space bookkeeping record, the descriptor table, and credentials.

use crate::arch::TrapFrame;
use crate::lib::error::KernelError;
use crate::process::fdtable::FdTable;
use alloc::string::String;
use alloc::vec::Vec;

pub type Pid = u32;

/// Process states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Process is runnable (ready or running)
    Running,
    /// Process is waiting (interruptible)
    Sleeping,
    /// Process has exited but not yet reaped
    Zombie,
    /// Process is stopped (for signals/debugging)
    Stopped,
}

/// Process credentials
#[derive(Debug, Clone, Copy)]
pub struct Credentials {
    pub uid: u32,
    pub gid: u32,
    pub euid: u32,
    pub egid: u32,
}

impl Default for Credentials {
    fn default() -> Self {
        Self { uid: 0, gid: 0, euid: 0, egid: 0 }
    }
}

/// Default layout for a fresh address space record. There is no paged
/// virtual memory in this kernel (see `mm`'s own doc comment); these are
/// just the addresses a loaded executable's stack/heap/mmap bookkeeping
/// starts from, not page-table-backed mappings.
pub const USER_STACK_TOP: u64 = 0x0000_7fff_ffff_f000;
pub const USER_HEAP_START: u64 = 0x0000_0000_0040_0000;
pub const USER_MMAP_BASE: u64 = 0x0000_7f00_0000_0000;

/// Address space bookkeeping record. Tracks the brk pointer and the VMA
/// list an executable's segments populate; there is no page table here —
/// see `mm`'s module doc for why paged VM is out of scope for this kernel.
#[derive(Debug)]
pub struct MemoryManager {
    pub brk: u64,
    pub brk_start: u64,
    pub stack_top: u64,
    pub mmap_base: u64,
    pub vmas: Vec<Vma>,
}

impl MemoryManager {
    pub fn new_user() -> Self {
        Self {
            brk: USER_HEAP_START,
            brk_start: USER_HEAP_START,
            stack_top: USER_STACK_TOP,
            mmap_base: USER_MMAP_BASE,
            vmas: Vec::new(),
        }
    }

    pub fn insert_vma(&mut self, vma: Vma) -> Result<(), KernelError> {
        self.vmas.push(vma);
        Ok(())
    }

    /// Ensure a stack VMA exists at `[stack_top - size, stack_top)`.
    pub fn setup_stack(&mut self) -> Result<(), KernelError> {
        const DEFAULT_STACK_SIZE: u64 = 8 * 1024 * 1024;
        if self.vmas.iter().any(|v| v.flags.contains(VmaFlags::STACK)) {
            return Ok(());
        }
        self.insert_vma(Vma {
            start: self.stack_top - DEFAULT_STACK_SIZE,
            end: self.stack_top,
            flags: VmaFlags::READ | VmaFlags::WRITE | VmaFlags::STACK,
            offset: 0,
        })
    }

    /// `brk(2)`: grow or shrink the heap VMA. Passing 0 queries the current
    /// break without changing it, matching the libc convention.
    pub fn do_brk(&mut self, new_brk: u64) -> Result<u64, KernelError> {
        if new_brk == 0 {
            return Ok(self.brk);
        }
        if new_brk < self.brk_start {
            return Err(KernelError::InvalidArg);
        }

        if let Some(heap) = self.vmas.iter_mut().find(|v| v.start == self.brk_start) {
            heap.end = new_brk;
        } else {
            self.vmas.push(Vma {
                start: self.brk_start,
                end: new_brk,
                flags: VmaFlags::READ | VmaFlags::WRITE | VmaFlags::ANONYMOUS,
                offset: 0,
            });
        }

        self.brk = new_brk;
        Ok(self.brk)
    }

    /// `mmap(2)`: bookkeeping-only, there being no page table to back it.
    /// A null `addr` picks the next free region above `mmap_base`; a
    /// nonzero `addr` is honored as-is (there's nothing to fail it against).
    pub fn do_mmap(&mut self, addr: u64, length: u64, prot: i32, flags: i32) -> Result<u64, KernelError> {
        const PROT_READ: i32 = 1;
        const PROT_WRITE: i32 = 2;
        const PROT_EXEC: i32 = 4;
        const MAP_SHARED: i32 = 0x01;

        if length == 0 {
            return Err(KernelError::InvalidArg);
        }
        let length = (length + 0xfff) & !0xfff; // page-align

        let start = if addr != 0 {
            addr
        } else {
            let next = self.vmas.iter().map(|v| v.end).max().unwrap_or(self.mmap_base);
            next.max(self.mmap_base)
        };

        let mut vma_flags = VmaFlags::ANONYMOUS;
        if prot & PROT_READ != 0 {
            vma_flags |= VmaFlags::READ;
        }
        if prot & PROT_WRITE != 0 {
            vma_flags |= VmaFlags::WRITE;
        }
        if prot & PROT_EXEC != 0 {
            vma_flags |= VmaFlags::EXEC;
        }
        if flags & MAP_SHARED != 0 {
            vma_flags |= VmaFlags::SHARED;
        }

        self.insert_vma(Vma {
            start,
            end: start + length,
            flags: vma_flags,
            offset: 0,
        })?;

        Ok(start)
    }

    /// `munmap(2)`: drop any VMA starting at `addr`. Partial unmaps of a
    /// larger region aren't split, matching this kernel's whole-VMA model.
    pub fn do_munmap(&mut self, addr: u64, length: u64) -> Result<(), KernelError> {
        let _ = length;
        self.vmas.retain(|v| v.start != addr);
        Ok(())
    }
}

/// Virtual Memory Area
#[derive(Debug, Clone)]
pub struct Vma {
    pub start: u64,
    pub end: u64,
    pub flags: VmaFlags,
    pub offset: u64,
}

bitflags::bitflags! {
    /// VMA protection and mapping flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VmaFlags: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const EXEC = 1 << 2;
        const SHARED = 1 << 3;
        const ANONYMOUS = 1 << 4;
        const COW = 1 << 5;
        const STACK = 1 << 6;
    }
}

/// Main task structure
pub struct Task {
    /// Process ID
    pub pid: Pid,
    /// Parent process ID
    pub ppid: Pid,
    /// Process state
    pub state: ProcessState,
    /// Exit code (valid when state is Zombie)
    pub exit_code: i32,
    /// Address space bookkeeping
    pub mm: MemoryManager,
    /// Open file descriptors
    pub fds: FdTable,
    /// Credentials
    pub cred: Credentials,
    /// Saved trap frame (for context switching)
    pub trap_frame: TrapFrame,
    /// CPU context (callee-saved registers + SP)
    pub cpu_context: crate::arch::CpuContext,
    /// Kernel stack, heap-backed since this kernel has no paging to map a
    /// dedicated stack region; kept alive for the task's lifetime.
    pub kstack: Vec<u8>,
    /// Process name
    pub name: String,
    /// Children PIDs
    pub children: Vec<Pid>,
    /// Signal queue (pending signals and handlers)
    pub signals: crate::process::signal::SignalQueue,
    /// Current working directory
    pub cwd: String,
}

const KSTACK_SIZE: usize = 16 * 1024;

impl Task {
    fn alloc_kstack() -> Vec<u8> {
        alloc::vec![0u8; KSTACK_SIZE]
    }

    /// Create a new task (for PID 1 / init)
    pub fn new_init() -> Self {
        Self {
            pid: 1,
            ppid: 0,
            state: ProcessState::Running,
            exit_code: 0,
            mm: MemoryManager::new_user(),
            fds: FdTable::new(),
            cred: Credentials::default(),
            trap_frame: TrapFrame::default(),
            cpu_context: crate::arch::CpuContext::new(),
            kstack: Self::alloc_kstack(),
            name: String::from("init"),
            children: Vec::new(),
            signals: crate::process::signal::SignalQueue::new(),
            cwd: String::from("/"),
        }
    }

    /// Create a new task as a fork of another
    pub fn fork_from(parent: &Task, child_pid: Pid) -> Self {
        let mut child_mm = MemoryManager::new_user();
        child_mm.brk = parent.mm.brk;
        child_mm.brk_start = parent.mm.brk_start;
        child_mm.stack_top = parent.mm.stack_top;
        child_mm.mmap_base = parent.mm.mmap_base;
        child_mm.vmas = parent.mm.vmas.clone();

        // Child gets same trap frame but the return value register will be
        // cleared to 0 in the fork syscall so the child observes fork() == 0.
        let child_tf = parent.trap_frame;

        Self {
            pid: child_pid,
            ppid: parent.pid,
            state: ProcessState::Running,
            exit_code: 0,
            mm: child_mm,
            fds: parent.fds.fork(),
            cred: parent.cred,
            trap_frame: child_tf,
            cpu_context: crate::arch::CpuContext::new(),
            kstack: Self::alloc_kstack(),
            name: parent.name.clone(),
            children: Vec::new(),
            signals: parent.signals.clone(),
            cwd: parent.cwd.clone(),
        }
    }

    /// Mark task as zombie and set exit code
    pub fn exit(&mut self, code: i32) {
        self.fds.close_all();
        self.state = ProcessState::Zombie;
        self.exit_code = code;
    }

    /// Check if task is a zombie
    pub fn is_zombie(&self) -> bool {
        self.state == ProcessState::Zombie
    }
}

impl core::fmt::Debug for Task {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Task")
            .field("pid", &self.pid)
            .field("ppid", &self.ppid)
            .field("state", &self.state)
            .field("name", &self.name)
            .finish()
    }
}
