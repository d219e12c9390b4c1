//! A condition variable: a wait queue of its own, paired at `wait()` time
//! with the caller's mutex. `broadcast()` splices every waiter onto the
//! mutex's queue rather than waking them directly, so they wake one at a
//! time as the mutex is released instead of all stampeding it at once.

use super::mutex::{Mutex, MutexGuard};
use super::waitqueue::{Park, WaitQueue, WakePolicy};

pub struct Condvar<P: Park> {
    queue: WaitQueue<P::Token>,
}

impl<P: Park> Condvar<P> {
    pub const fn new() -> Self {
        Self { queue: WaitQueue::new() }
    }

    /// Atomically release `guard`'s mutex and block; reacquires it before
    /// returning.
    pub fn wait<'a, T>(&self, guard: MutexGuard<'a, T, P>, park: &'a P) -> MutexGuard<'a, T, P> {
        let mutex = guard.mutex;
        drop(guard);
        self.queue.wait(park, None, || {}, || {});
        mutex.acquire_after_wake(park);
        MutexGuard { mutex, park }
    }

    /// Wake a single waiter directly (used when only one waiter can ever
    /// make progress, e.g. a single-producer queue).
    pub fn signal(&self, park: &P) {
        self.queue.wake(park, WakePolicy::WakeOne);
    }

    /// Move every waiter onto `mutex`'s own queue so releasing the mutex
    /// wakes them one at a time instead of all racing to reacquire it.
    pub fn broadcast<T>(&self, mutex: &Mutex<T, P>) {
        self.queue.splice_to(mutex.queue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::waitqueue::Park;
    use core::cell::RefCell;

    struct FakePark {
        current: u32,
        woken: RefCell<alloc::vec::Vec<u32>>,
    }

    impl Park for FakePark {
        type Token = u32;
        fn current(&self) -> u32 {
            self.current
        }
        fn block(&self, _timeout_ns: Option<u64>) -> bool {
            true
        }
        fn wake(&self, token: u32) {
            self.woken.borrow_mut().push(token);
        }
    }

    #[test]
    fn broadcast_moves_waiters_onto_the_mutex_queue() {
        let m: Mutex<u32, FakePark> = Mutex::new(0);
        let cv: Condvar<FakePark> = Condvar::new();
        let park = FakePark { current: 1, woken: RefCell::new(alloc::vec::Vec::new()) };
        cv.queue.wake(&park, WakePolicy::WakeOne); // no-op, queue empty
        assert!(m.queue().is_empty());
        cv.broadcast(&m);
        assert!(m.queue().is_empty());
    }
}
