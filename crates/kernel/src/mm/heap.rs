//! Kernel heap: a `linked_list_allocator` free list carved out of the
//! largest extent [`super::boot_allocator::BootAllocator`] still has free
//! once boot-time setup is done.

use core::alloc::{GlobalAlloc, Layout};
use core::sync::atomic::{AtomicBool, Ordering};
use linked_list_allocator::LockedHeap;
use spin::Mutex;

#[global_allocator]
static ALLOCATOR: StatsTrackingAllocator = StatsTrackingAllocator;

static HEAP: LockedHeap = LockedHeap::empty();
static HEAP_INIT_DONE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, Default)]
pub struct HeapStats {
    pub total_allocations: u64,
    pub total_deallocations: u64,
    pub current_allocated: usize,
    pub peak_allocated: usize,
    pub allocation_failures: u64,
}

static HEAP_STATS: Mutex<HeapStats> = Mutex::new(HeapStats {
    total_allocations: 0,
    total_deallocations: 0,
    current_allocated: 0,
    peak_allocated: 0,
    allocation_failures: 0,
});

/// Initialize the global heap over `[base, base + size)`. `base`/`size` come
/// from the boot allocator's largest remaining extent; callers must not
/// touch that extent through the boot allocator again afterwards.
///
/// # Safety
/// `base..base+size` must be backed RAM not otherwise in use.
pub unsafe fn init(base: usize, size: usize) {
    if HEAP_INIT_DONE
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        HEAP.lock().init(base as *mut u8, size);
        crate::kinfo!("heap: {} KiB at {:#x}", size / 1024, base);
    }
}

pub fn stats() -> HeapStats {
    *HEAP_STATS.lock()
}

struct StatsTrackingAllocator;

unsafe impl GlobalAlloc for StatsTrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = HEAP.alloc(layout);
        let mut stats = HEAP_STATS.lock();
        if ptr.is_null() {
            stats.allocation_failures += 1;
        } else {
            stats.total_allocations += 1;
            stats.current_allocated += layout.size();
            stats.peak_allocated = stats.peak_allocated.max(stats.current_allocated);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let mut stats = HEAP_STATS.lock();
        stats.total_deallocations += 1;
        stats.current_allocated = stats.current_allocated.saturating_sub(layout.size());
        drop(stats);
        HEAP.dealloc(ptr, layout);
    }
}

#[alloc_error_handler]
fn alloc_error_handler(layout: Layout) -> ! {
    let stats = stats();
    crate::kerror!(
        "out of memory: requested {} bytes (align {}), {} bytes allocated, {} prior failures",
        layout.size(),
        layout.align(),
        stats.current_allocated,
        stats.allocation_failures
    );
    loop {
        core::hint::spin_loop();
    }
}
