//! Reference-counted object instances built on top of [`super::class::Class`].
//!
//! Every kernel object (I/O channel, driver, filesystem, process, dispatch
//! item...) embeds an [`ObjectHeader`] as its first field. `retain`/`release`
//! operate on the type-erased header; `release` runs the class's deinit
//! chain, most-derived class first, when the count reaches zero.

use super::class::Class;
use core::sync::atomic::{AtomicIsize, Ordering};

/// Vtable slot index for the per-class deinit hook.
pub const DEINIT_SLOT: usize = 0;

/// Signature every class's deinit slot must match. Runs only that class's
/// own teardown (closing its handles, freeing its buffers) — the chain
/// walk in [`release`] is responsible for invoking every ancestor's deinit
/// in turn, not this function.
pub type DeinitFn = unsafe fn(*mut ObjectHeader);

#[repr(C)]
pub struct ObjectHeader {
    class: &'static Class,
    refcount: AtomicIsize,
}

impl ObjectHeader {
    /// Construct a header with an initial reference count of one. The
    /// caller owns placing this at offset zero of the concrete object type.
    pub const fn new(class: &'static Class) -> Self {
        Self { class, refcount: AtomicIsize::new(1) }
    }

    pub fn class(&self) -> &'static Class {
        self.class
    }

    pub fn is_a(&self, class: &Class) -> bool {
        self.class.is_a(class)
    }

    pub fn refcount(&self) -> isize {
        self.refcount.load(Ordering::Relaxed)
    }
}

/// A concrete, sized object: any type whose first field is an
/// [`ObjectHeader`]. Marker trait; implementers get `retain`/`release` for
/// free by reinterpreting `&Self` as `&ObjectHeader`.
///
/// # Safety
/// Implementers must place `ObjectHeader` as the first field (`#[repr(C)]`)
/// so that a `*mut Self` and a `*mut ObjectHeader` share an address.
pub unsafe trait Object {
    fn header(&self) -> &ObjectHeader;
}

/// Increment an object's reference count. The caller must already hold a
/// valid reference (this does not create one from nothing).
pub unsafe fn retain(obj: *mut ObjectHeader) -> *mut ObjectHeader {
    let prev = (*obj).refcount.fetch_add(1, Ordering::Relaxed);
    debug_assert!(prev >= 1, "retain on an object with no outstanding reference");
    obj
}

/// Decrement an object's reference count. When it reaches zero, runs the
/// deinit chain from the most-derived class up through every ancestor that
/// defines its own deinit slot, then the caller is responsible for freeing
/// the backing memory (the object runtime itself never allocates).
pub unsafe fn release(obj: *mut ObjectHeader) {
    let prev = (*obj).refcount.fetch_sub(1, Ordering::AcqRel);
    debug_assert!(prev >= 1, "refcount underflow on release");
    if prev == 1 {
        let mut cur = Some((*obj).class);
        while let Some(class) = cur {
            if let Some(method) = class.own_method(DEINIT_SLOT) {
                let deinit: DeinitFn = core::mem::transmute(method);
                deinit(obj);
            }
            cur = class.superclass();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kobj::class::ClassBuilder;
    use core::sync::atomic::AtomicU32;

    static BASE_DEINIT_COUNT: AtomicU32 = AtomicU32::new(0);
    static DERIVED_DEINIT_COUNT: AtomicU32 = AtomicU32::new(0);

    unsafe fn base_deinit(_obj: *mut ObjectHeader) {
        BASE_DEINIT_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    unsafe fn derived_deinit(_obj: *mut ObjectHeader) {
        DERIVED_DEINIT_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn release_runs_full_deinit_chain() {
        BASE_DEINIT_COUNT.store(0, Ordering::Relaxed);
        DERIVED_DEINIT_COUNT.store(0, Ordering::Relaxed);

        let base_vtable: &'static [Option<usize>] = &[Some(base_deinit as usize)];
        static mut BASE: Option<Class> = None;
        let base_slot = unsafe { &raw mut BASE };
        unsafe {
            *base_slot = Some(ClassBuilder::new("Base", 8, base_vtable).build(&[DEINIT_SLOT]));
        }
        let base_ref: &'static Class = unsafe { (*base_slot).as_ref().unwrap() };

        let derived_vtable: &'static [Option<usize>] = &[Some(derived_deinit as usize)];
        let derived = ClassBuilder::new("Derived", 8, derived_vtable)
            .extends(base_ref)
            .build(&[DEINIT_SLOT]);

        let mut header = ObjectHeader::new(unsafe { core::mem::transmute::<&Class, &'static Class>(&derived) });
        let ptr = &mut header as *mut ObjectHeader;

        unsafe {
            retain(ptr);
            assert_eq!((*ptr).refcount(), 2);
            release(ptr);
            assert_eq!(DERIVED_DEINIT_COUNT.load(Ordering::Relaxed), 0);
            release(ptr);
        }

        assert_eq!(DERIVED_DEINIT_COUNT.load(Ordering::Relaxed), 1);
        assert_eq!(BASE_DEINIT_COUNT.load(Ordering::Relaxed), 1);
    }
}
