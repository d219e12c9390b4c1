//! Interrupt controller: a priority-sorted handler array per IRQ line,
//! mutated by copy-sort-atomic-swap so the interrupt path itself never takes
//! a lock and never observes a torn array.
//!
//! Mutators (`add_direct`, `add_semaphore`, `remove`) serialize per IRQ line
//! on that line's own mutex. Each allocates a brand new `Vec`, inserts or
//! removes an entry, sorts it by descending priority, then — with IRQs
//! disabled on this core — swaps the pointer the interrupt path reads. The
//! interrupt handler only ever reads a fully-built, immutable array and
//! never takes the mutex.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

pub const NUM_IRQS: usize = 16;

/// A handler invoked by `on_interrupt`. `ctx` is whatever the registrant
/// supplied at registration time (closures aren't `'static`-friendly in a
/// `no_std` handler table, so callbacks take an opaque context pointer
/// instead).
pub type HandlerFn = fn(ctx: usize);

#[derive(Clone, Copy)]
struct Entry {
    id: u64,
    priority: i32,
    handler: HandlerFn,
    ctx: usize,
    enabled: bool,
}

struct IrqLine {
    handlers: Mutex<Arc<Vec<Entry>>>,
    live_count: AtomicUsize,
}

impl IrqLine {
    const fn new() -> Self {
        Self {
            handlers: Mutex::new(Arc::new(Vec::new())),
            live_count: AtomicUsize::new(0),
        }
    }
}

static LINES: [IrqLine; NUM_IRQS] = [const { IrqLine::new() }; NUM_IRQS];
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

static SPURIOUS: AtomicU64 = AtomicU64::new(0);
static UNINITIALIZED: AtomicU64 = AtomicU64::new(0);
static NON_MASKABLE: AtomicU64 = AtomicU64::new(0);

/// Trait the PIC/APIC glue implements to let this module enable/disable an
/// IRQ source at the hardware when a handler count transitions 0↔1.
pub trait HardwareIrq {
    /// # Safety
    /// Must only be called with a handler already installed (enable) or
    /// about to be fully removed (disable); the caller upholds ordering.
    unsafe fn enable(&self, irq: usize);
    unsafe fn disable(&self, irq: usize);
}

/// Applies `f` to a clone of the current array under the line's mutex,
/// re-sorts, and swaps it in. Returns `(count_before, count_after)` so
/// callers can react to a 0↔1 transition without a separate, racy check.
fn with_new_array<F: FnOnce(&mut Vec<Entry>)>(irq: usize, f: F) -> (usize, usize) {
    let line = &LINES[irq];
    let mut guard = line.handlers.lock();
    let before = guard.len();
    let mut next: Vec<Entry> = (**guard).clone();
    f(&mut next);
    next.sort_by(|a, b| b.priority.cmp(&a.priority));
    let after = next.len();
    let new_arc = Arc::new(next);

    // The swap itself is what must be atomic with respect to the interrupt
    // path: disable IRQs on this core for the pointer replacement only.
    without_interrupts(|| {
        *guard = new_arc;
    });
    line.live_count.store(after, Ordering::Release);
    (before, after)
}

/// Register a direct handler. Returns a stable id usable with [`remove`].
pub fn add_direct(irq: usize, priority: i32, handler: HandlerFn, ctx: usize, hw: &dyn HardwareIrq) -> u64 {
    assert!(irq < NUM_IRQS, "irq out of range");
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let entry = Entry { id, priority, handler, ctx, enabled: false };
    let (before, _after) = with_new_array(irq, |v| v.push(entry));
    if before == 0 {
        unsafe { hw.enable(irq) };
    }
    id
}

/// Register a semaphore-release handler: `ctx` is a semaphore pointer and
/// `handler` is expected to release it. Structurally identical to
/// `add_direct` — the distinction is purely in what the caller passes.
pub fn add_semaphore(irq: usize, priority: i32, handler: HandlerFn, semaphore_ctx: usize, hw: &dyn HardwareIrq) -> u64 {
    add_direct(irq, priority, handler, semaphore_ctx, hw)
}

/// Remove a previously registered handler by id.
pub fn remove(irq: usize, id: u64, hw: &dyn HardwareIrq) {
    assert!(irq < NUM_IRQS, "irq out of range");
    let (_before, after) = with_new_array(irq, |v| v.retain(|e| e.id != id));
    if after == 0 {
        unsafe { hw.disable(irq) };
    }
}

/// Enable a specific handler (new handlers start disabled).
pub fn set_enabled(irq: usize, id: u64, enabled: bool) {
    assert!(irq < NUM_IRQS, "irq out of range");
    with_new_array(irq, |v| {
        if let Some(e) = v.iter_mut().find(|e| e.id == id) {
            e.enabled = enabled;
        }
    });
}

/// Called by the low-level vector glue for a given IRQ line. Walks the
/// precomputed, priority-sorted array without taking any lock.
pub fn on_interrupt(irq: usize) {
    if irq >= NUM_IRQS {
        SPURIOUS.fetch_add(1, Ordering::Relaxed);
        return;
    }
    let array = LINES[irq].handlers.lock().clone();
    if array.is_empty() {
        UNINITIALIZED.fetch_add(1, Ordering::Relaxed);
        return;
    }
    for entry in array.iter() {
        if entry.enabled {
            (entry.handler)(entry.ctx);
        }
    }
}

pub fn note_non_maskable() {
    NON_MASKABLE.fetch_add(1, Ordering::Relaxed);
}

pub fn spurious_count() -> u64 {
    SPURIOUS.load(Ordering::Relaxed)
}

pub fn uninitialized_count() -> u64 {
    UNINITIALIZED.load(Ordering::Relaxed)
}

pub fn non_maskable_count() -> u64 {
    NON_MASKABLE.load(Ordering::Relaxed)
}

#[cfg(target_arch = "x86_64")]
fn without_interrupts<F: FnOnce()>(f: F) {
    x86_64::instructions::interrupts::without_interrupts(f);
}

#[cfg(not(target_arch = "x86_64"))]
fn without_interrupts<F: FnOnce()>(f: F) {
    f();
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize as Counter;

    struct NoopHw;
    impl HardwareIrq for NoopHw {
        unsafe fn enable(&self, _irq: usize) {}
        unsafe fn disable(&self, _irq: usize) {}
    }

    static CALLS: Counter = Counter::new(0);
    fn record(_ctx: usize) {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn reset(irq: usize) {
        *LINES[irq].handlers.lock() = Arc::new(Vec::new());
        LINES[irq].live_count.store(0, Ordering::SeqCst);
        CALLS.store(0, Ordering::SeqCst);
    }

    static ORDER: Mutex<Vec<i32>> = Mutex::new(Vec::new());
    fn record_ctx(ctx: usize) {
        ORDER.lock().push(ctx as i32);
    }

    #[test]
    fn handlers_fire_in_priority_order() {
        reset(5);
        ORDER.lock().clear();
        let hw = NoopHw;
        let id_a = add_direct(5, 1, record_ctx, 1, &hw);
        let id_b = add_direct(5, 10, record_ctx, 10, &hw);
        let id_c = add_direct(5, 5, record_ctx, 5, &hw);
        set_enabled(5, id_a, true);
        set_enabled(5, id_b, true);
        set_enabled(5, id_c, true);
        on_interrupt(5);
        assert_eq!(ORDER.lock().clone(), alloc::vec![10, 5, 1]);
    }

    #[test]
    fn remove_drops_the_handler() {
        reset(6);
        let hw = NoopHw;
        let id = add_direct(6, 0, record, 0, &hw);
        set_enabled(6, id, true);
        on_interrupt(6);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        remove(6, id, &hw);
        on_interrupt(6);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_handlers_start_disabled() {
        reset(7);
        let hw = NoopHw;
        let _id = add_direct(7, 0, record, 0, &hw);
        on_interrupt(7);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }
}
