//! Process management: the task table, fork/exit/wait, the per-process
//! descriptor table, and the (stub) scheduler.

pub mod current;
pub mod exec;
pub mod fdtable;
pub mod fork;
pub mod pid;
pub mod scheduler;
pub mod signal;
pub mod task;
pub mod wait;

pub use current::{current_pid, set_current_pid, switch_to};
pub use fdtable::FdTable;
pub use fork::do_fork;
pub use pid::{alloc_pid, get_process_table, init_process_table, insert_task, PidTable};
pub use task::{Credentials, MemoryManager, Pid, ProcessState, Task, Vma, VmaFlags};
pub use wait::{do_wait4, w_exitcode, WCONTINUED, WNOHANG, WUNTRACED};

/// The current process, as a PID. Delegates to the per-CPU-ready
/// [`current`] module rather than hardcoding PID 1.
pub fn current_process() -> Pid {
    current_pid()
}
