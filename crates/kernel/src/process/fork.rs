//! Process duplication (`fork`).
//!
//! Duplicates a task's address-space bookkeeping, descriptor table, and
//! credentials into a freshly allocated PID. CPU context/trap-frame return
//! value differentiation (parent gets the child PID, child gets 0) is the
//! caller's responsibility at the syscall boundary, since that's where the
//! current vCPU's register file is available to mutate.

use super::{alloc_pid, get_process_table, insert_task, Pid, Task};
use crate::lib::error::Errno;

/// Fork the current process, returning the new child's PID to the caller
/// (which the `fork` syscall then reflects into the parent's return
/// register; the child observes 0, set by the syscall handler once it
/// resumes the duplicated trap frame).
pub fn do_fork(parent_pid: Pid) -> Result<Pid, Errno> {
    crate::kdebug!("do_fork: forking process {}", parent_pid);

    let child_pid = alloc_pid().map_err(|e| {
        crate::kerror!("do_fork: failed to allocate child PID: {:?}", e);
        Errno::EAGAIN
    })?;

    let child = {
        let mut table = get_process_table();
        let table = table.as_mut().ok_or(Errno::ESRCH)?;
        let parent = table.get(parent_pid).ok_or(Errno::ESRCH)?;
        Task::fork_from(parent, child_pid)
    };

    insert_task(child).map_err(|e| {
        crate::kerror!("do_fork: failed to insert child task: {:?}", e);
        Errno::EAGAIN
    })?;

    record_fork_success();
    crate::kinfo!("do_fork: created child process {} from parent {}", child_pid, parent_pid);
    Ok(child_pid)
}

/// Execute a new program image in place of the current process. The actual
/// loading is `process::exec::load_elf`; this just resolves the path
/// through the catalog and re-points the task at the freshly loaded image.
pub fn do_exec(_pid: Pid, _path: &str, _args: &[&str]) -> Result<(), Errno> {
    crate::kwarn!("do_exec: path lookup through the catalog not wired up yet");
    Err(Errno::ENOSYS)
}

/// Fork statistics, for debugging.
#[derive(Debug, Clone, Copy)]
pub struct ForkStats {
    pub total_forks: usize,
    pub failed_forks: usize,
}

use core::sync::atomic::{AtomicUsize, Ordering};

static TOTAL_FORKS: AtomicUsize = AtomicUsize::new(0);
static FAILED_FORKS: AtomicUsize = AtomicUsize::new(0);

pub fn record_fork_success() {
    TOTAL_FORKS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_fork_failure() {
    FAILED_FORKS.fetch_add(1, Ordering::Relaxed);
}

pub fn get_fork_stats() -> ForkStats {
    ForkStats {
        total_forks: TOTAL_FORKS.load(Ordering::Relaxed),
        failed_forks: FAILED_FORKS.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_stats() {
        record_fork_success();
        record_fork_success();
        record_fork_failure();

        let stats = get_fork_stats();
        assert!(stats.total_forks >= 2);
        assert!(stats.failed_forks >= 1);
    }
}
