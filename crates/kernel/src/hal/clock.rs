//! Monotonic clock: a quantum counter plus a `(sec, nsec)` wall-clock offset,
//! advanced once per timer tick and read back seqlock-style.
//!
//! The quantum index doubles as the sequence number: the tick handler
//! updates `sec`/`nsec` and only then bumps the quantum, so a reader that
//! sees the same quantum before and after its load of `sec`/`nsec` knows it
//! read a coherent pair. There is no separate odd/even seq word because
//! there is exactly one writer (the timer interrupt) and it never overlaps
//! itself.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Nanoseconds per quantum. The legacy timer this kernel drives is
/// programmed for 1000 Hz, so one quantum is one millisecond.
pub const NS_PER_QUANTUM: u64 = 1_000_000;

static QUANTUM: AtomicU64 = AtomicU64::new(0);
static SEC: AtomicU64 = AtomicU64::new(0);
static NSEC: AtomicU32 = AtomicU32::new(0);

/// A `(seconds, nanoseconds)` timestamp, nsec always in `[0, 1_000_000_000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSpec {
    pub sec: u64,
    pub nsec: u32,
}

impl TimeSpec {
    pub const ZERO: TimeSpec = TimeSpec { sec: 0, nsec: 0 };

    fn add_ns(self, extra_ns: u64) -> TimeSpec {
        let total_ns = self.nsec as u64 + extra_ns;
        TimeSpec {
            sec: self.sec + total_ns / 1_000_000_000,
            nsec: (total_ns % 1_000_000_000) as u32,
        }
    }
}

/// How rounding behaves when a duration doesn't land on an exact quantum
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    TowardZero,
    AwayFromZero,
}

/// Source of sub-quantum elapsed time, abstracted so the seqlock retry loop
/// is host-testable without a real hardware timer.
pub trait IntraQuantumTimer {
    /// Nanoseconds elapsed since the start of the current quantum. Must be
    /// less than [`NS_PER_QUANTUM`] in steady state, but callers must not
    /// rely on that — a late read racing the next tick can exceed it
    /// momentarily, which is harmless since the seqlock retry discards it.
    fn elapsed_ns(&self) -> u64;
}

/// Advance the clock by one quantum. Called from the timer interrupt
/// handler only; never call this from anywhere else.
pub fn tick() {
    let sec = SEC.load(Ordering::Relaxed);
    let nsec = NSEC.load(Ordering::Relaxed);
    let next = TimeSpec { sec, nsec }.add_ns(NS_PER_QUANTUM);
    SEC.store(next.sec, Ordering::Relaxed);
    NSEC.store(next.nsec, Ordering::Release);
    QUANTUM.fetch_add(1, Ordering::Release);
}

/// The current quantum index, i.e. the number of timer ticks since boot.
pub fn current_quantum() -> u64 {
    QUANTUM.load(Ordering::Acquire)
}

/// Read the current time, retrying if a tick lands mid-read.
pub fn get_current_time<T: IntraQuantumTimer>(timer: &T) -> TimeSpec {
    loop {
        let q1 = QUANTUM.load(Ordering::Acquire);
        let sec = SEC.load(Ordering::Relaxed);
        let nsec = NSEC.load(Ordering::Acquire);
        let extra = timer.elapsed_ns();
        let q2 = QUANTUM.load(Ordering::Acquire);
        if q1 == q2 {
            return TimeSpec { sec, nsec }.add_ns(extra);
        }
    }
}

/// Microsecond timestamp used by the logging subsystem. Does not consult
/// the hardware timer for intra-quantum precision — log timestamps only
/// need quantum-granularity ordering, not sub-millisecond accuracy.
pub fn now_us() -> u64 {
    let sec = SEC.load(Ordering::Relaxed);
    let nsec = NSEC.load(Ordering::Relaxed);
    sec * 1_000_000 + nsec as u64 / 1_000
}

/// Convert a [`TimeSpec`] to a quantum count, rounding as directed.
pub fn timespec_to_quantum(ts: TimeSpec, rounding: Rounding) -> u64 {
    let total_ns = ts.sec.saturating_mul(1_000_000_000) + ts.nsec as u64;
    match rounding {
        Rounding::TowardZero => total_ns / NS_PER_QUANTUM,
        Rounding::AwayFromZero => {
            (total_ns + NS_PER_QUANTUM - 1) / NS_PER_QUANTUM
        }
    }
}

/// Convert a quantum count back to a [`TimeSpec`].
pub fn quantum_to_timespec(quantum: u64) -> TimeSpec {
    let total_ns = quantum * NS_PER_QUANTUM;
    TimeSpec {
        sec: total_ns / 1_000_000_000,
        nsec: (total_ns % 1_000_000_000) as u32,
    }
}

/// Spin-wait for sub-millisecond timeouts; longer waits return `false` so
/// the caller blocks on a wait queue instead of burning CPU.
pub fn delay<T: IntraQuantumTimer>(timer: &T, timeout: TimeSpec) -> bool {
    if timeout.sec > 0 || timeout.nsec >= NS_PER_QUANTUM as u32 {
        return false;
    }
    let deadline_ns = timeout.nsec as u64;
    let start_quantum = current_quantum();
    loop {
        if current_quantum() != start_quantum {
            return true;
        }
        if timer.elapsed_ns() >= deadline_ns {
            return true;
        }
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeTimer(Cell<u64>);
    impl IntraQuantumTimer for FakeTimer {
        fn elapsed_ns(&self) -> u64 {
            self.0.get()
        }
    }

    fn reset() {
        QUANTUM.store(0, Ordering::SeqCst);
        SEC.store(0, Ordering::SeqCst);
        NSEC.store(0, Ordering::SeqCst);
    }

    #[test]
    fn tick_advances_by_exactly_one_quantum() {
        reset();
        tick();
        let t = FakeTimer(Cell::new(0));
        let now = get_current_time(&t);
        assert_eq!(now, TimeSpec { sec: 0, nsec: NS_PER_QUANTUM as u32 });
    }

    #[test]
    fn get_current_time_adds_intra_quantum_elapsed() {
        reset();
        tick();
        let t = FakeTimer(Cell::new(500));
        let now = get_current_time(&t);
        assert_eq!(now.nsec, NS_PER_QUANTUM as u32 + 500);
    }

    #[test]
    fn timespec_quantum_roundtrip_rounds_as_requested() {
        let ts = TimeSpec { sec: 0, nsec: 1_500_000 };
        assert_eq!(timespec_to_quantum(ts, Rounding::TowardZero), 1);
        assert_eq!(timespec_to_quantum(ts, Rounding::AwayFromZero), 2);
    }

    #[test]
    fn quantum_to_timespec_is_exact() {
        assert_eq!(quantum_to_timespec(1000), TimeSpec { sec: 1, nsec: 0 });
    }

    #[test]
    fn delay_rejects_timeouts_of_a_millisecond_or_more() {
        reset();
        let t = FakeTimer(Cell::new(0));
        assert!(!delay(&t, TimeSpec { sec: 0, nsec: NS_PER_QUANTUM as u32 }));
        assert!(!delay(&t, TimeSpec { sec: 1, nsec: 0 }));
    }

    #[test]
    fn delay_returns_once_elapsed_reaches_timeout() {
        reset();
        let t = FakeTimer(Cell::new(0));
        t.0.set(100);
        assert!(delay(&t, TimeSpec { sec: 0, nsec: 100 }));
    }
}
