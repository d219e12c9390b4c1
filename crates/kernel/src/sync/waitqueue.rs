//! A FIFO queue of blocked vCPUs, used directly by callers that don't need
//! mutual exclusion and as the building block for [`super::mutex::Mutex`]
//! and [`super::condvar::Condvar`].
//!
//! The actual "deschedule this vCPU" primitive is supplied by callers
//! through [`Park`], so the queueing and wake-policy logic here is
//! host-testable without the real vCPU subsystem.

use alloc::collections::VecDeque;
use spin::Mutex as SpinMutex;

/// How a wake call selects who to wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakePolicy {
    WakeOne,
    WakeAll,
}

/// Outcome of a [`WaitQueue::wait`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    Ok,
    Interrupted,
    Timeout,
}

bitflags::bitflags! {
    /// Flags controlling how a wait's timeout is interpreted.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct WaitFlags: u32 {
        /// Timeout is an absolute deadline rather than a relative duration.
        const ABSOLUTE_TIMEOUT = 1 << 0;
    }
}

/// Descheduling hook a waiter supplies. `Token` identifies a specific
/// blocked vCPU so a wake call can target it.
pub trait Park {
    type Token: Copy + Eq;

    /// A token identifying the calling vCPU.
    fn current(&self) -> Self::Token;

    /// Deschedule the calling vCPU until [`Self::wake`] targets its token,
    /// or `timeout_ns` (if `Some`) elapses. Returns `true` if woken,
    /// `false` on timeout.
    fn block(&self, timeout_ns: Option<u64>) -> bool;

    /// Make `token`'s vCPU runnable again.
    fn wake(&self, token: Self::Token);
}

struct Waiter<T> {
    token: T,
}

pub struct WaitQueue<T> {
    waiters: SpinMutex<VecDeque<Waiter<T>>>,
}

impl<T: Copy + Eq> WaitQueue<T> {
    pub const fn new() -> Self {
        Self { waiters: SpinMutex::new(VecDeque::new()) }
    }

    /// Enqueue the caller and deschedule it, with `unlock`/`relock` run
    /// around the block so a caller holding an external lock (a mutex's
    /// owner state, say) can release it only for the duration of the
    /// sleep — mirroring how `wait()` atomically drops a caller-supplied
    /// lock before blocking and reacquires it before returning.
    pub fn wait<P: Park<Token = T>>(
        &self,
        park: &P,
        timeout_ns: Option<u64>,
        unlock: impl FnOnce(),
        relock: impl FnOnce(),
    ) -> WaitResult {
        let token = park.current();
        self.waiters.lock().push_back(Waiter { token });
        unlock();

        let woken = park.block(timeout_ns);

        relock();

        if woken {
            WaitResult::Ok
        } else {
            // Timed out: remove ourselves if we're still queued (a racing
            // waker may have already popped us, in which case this is a
            // harmless no-op and the wake simply arrived moot).
            self.waiters.lock().retain(|w| w.token != token);
            WaitResult::Timeout
        }
    }

    /// Wake according to `policy`. Returns the number of waiters woken.
    pub fn wake<P: Park<Token = T>>(&self, park: &P, policy: WakePolicy) -> usize {
        let mut waiters = self.waiters.lock();
        match policy {
            WakePolicy::WakeOne => {
                if let Some(w) = waiters.pop_front() {
                    park.wake(w.token);
                    1
                } else {
                    0
                }
            }
            WakePolicy::WakeAll => {
                let n = waiters.len();
                while let Some(w) = waiters.pop_front() {
                    park.wake(w.token);
                }
                n
            }
        }
    }

    /// Move every waiter onto `other`, without waking them — used by
    /// [`super::condvar::Condvar::broadcast`] to hand waiters to the
    /// paired mutex so they wake one at a time as it's released.
    pub fn splice_to(&self, other: &WaitQueue<T>) {
        let mut src = self.waiters.lock();
        let mut dst = other.waiters.lock();
        while let Some(w) = src.pop_front() {
            dst.push_back(w);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.waiters.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    struct FakePark {
        woken: RefCell<alloc::vec::Vec<u32>>,
        timed_out_tokens: RefCell<alloc::vec::Vec<u32>>,
        current_token: u32,
    }

    impl FakePark {
        fn new(current_token: u32) -> Self {
            Self { woken: RefCell::new(alloc::vec::Vec::new()), timed_out_tokens: RefCell::new(alloc::vec::Vec::new()), current_token }
        }
    }

    impl Park for FakePark {
        type Token = u32;
        fn current(&self) -> u32 {
            self.current_token
        }
        fn block(&self, _timeout_ns: Option<u64>) -> bool {
            if self.timed_out_tokens.borrow().contains(&self.current_token) {
                false
            } else {
                self.woken.borrow_mut().push(self.current_token);
                true
            }
        }
        fn wake(&self, _token: u32) {}
    }

    #[test]
    fn wake_one_wakes_oldest_waiter_first() {
        let wq: WaitQueue<u32> = WaitQueue::new();
        let p1 = FakePark::new(1);
        let p2 = FakePark::new(2);
        wq.waiters.lock().push_back(Waiter { token: 1 });
        wq.waiters.lock().push_back(Waiter { token: 2 });
        assert_eq!(wq.len(), 2);
        let n = wq.wake(&p1, WakePolicy::WakeOne);
        assert_eq!(n, 1);
        assert_eq!(wq.len(), 1);
        assert_eq!(wq.waiters.lock()[0].token, 2);
        let _ = p2;
    }

    #[test]
    fn wake_all_drains_the_queue() {
        let wq: WaitQueue<u32> = WaitQueue::new();
        wq.waiters.lock().push_back(Waiter { token: 1 });
        wq.waiters.lock().push_back(Waiter { token: 2 });
        let p = FakePark::new(1);
        let n = wq.wake(&p, WakePolicy::WakeAll);
        assert_eq!(n, 2);
        assert!(wq.is_empty());
    }

    #[test]
    fn splice_moves_waiters_without_waking() {
        let a: WaitQueue<u32> = WaitQueue::new();
        let b: WaitQueue<u32> = WaitQueue::new();
        a.waiters.lock().push_back(Waiter { token: 7 });
        a.splice_to(&b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn timed_out_wait_removes_itself_from_the_queue() {
        let wq: WaitQueue<u32> = WaitQueue::new();
        let mut p = FakePark::new(9);
        p.timed_out_tokens.get_mut().push(9);
        let mut unlocked = false;
        let mut relocked = false;
        let result = wq.wait(&p, Some(1), || unlocked = true, || relocked = true);
        assert_eq!(result, WaitResult::Timeout);
        assert!(unlocked && relocked);
        assert!(wq.is_empty());
    }
}
