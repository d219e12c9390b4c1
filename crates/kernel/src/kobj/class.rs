//! Class descriptors: single-inheritance, manually built vtables.
//!
//! A [`Class`] is a `'static` descriptor: a name, an optional superclass, the
//! size of an instance, and a vtable of method slots. Method slots are plain
//! function pointers erased to [`Method`] (a `usize`); callers cast them back
//! to the concrete `fn` type for the slot they're invoking. There is no
//! dynamic class loading — every `Class` this kernel ever uses is built once,
//! during subsystem init, by a [`ClassBuilder`].

use core::fmt;

/// An erased method slot. Cast back with `core::mem::transmute` at the call
/// site, where the concrete `fn` signature for that slot is known.
pub type Method = usize;

pub struct Class {
    name: &'static str,
    superclass: Option<&'static Class>,
    instance_size: usize,
    vtable: &'static [Option<Method>],
}

impl Class {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn instance_size(&self) -> usize {
        self.instance_size
    }

    pub fn superclass(&self) -> Option<&'static Class> {
        self.superclass
    }

    /// Resolve a method slot, walking up the superclass chain if this class
    /// doesn't override it.
    pub fn method(&self, slot: usize) -> Option<Method> {
        self.own_method(slot)
            .or_else(|| self.superclass.and_then(|s| s.method(slot)))
    }

    /// Resolve a method slot without inheriting from the superclass. Used by
    /// the object runtime's deinit chain, which must run every ancestor's
    /// own deinit rather than just the most-derived override.
    pub fn own_method(&self, slot: usize) -> Option<Method> {
        self.vtable.get(slot).copied().flatten()
    }

    /// True if `self` is `other` or a (possibly indirect) subclass of it.
    pub fn is_a(&self, other: &Class) -> bool {
        core::ptr::eq(self, other) || self.superclass.is_some_and(|s| s.is_a(other))
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.map(|s| s.name))
            .field("instance_size", &self.instance_size)
            .finish()
    }
}

pub struct ClassBuilder {
    name: &'static str,
    superclass: Option<&'static Class>,
    instance_size: usize,
    vtable: &'static [Option<Method>],
}

impl ClassBuilder {
    pub const fn new(name: &'static str, instance_size: usize, vtable: &'static [Option<Method>]) -> Self {
        Self { name, superclass: None, instance_size, vtable }
    }

    pub const fn extends(mut self, superclass: &'static Class) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Build the class, asserting every slot named in `required` resolves
    /// (own or inherited). A class shipped with a hole in its required
    /// vtable is a boot-time bug, not a runtime error — this panics rather
    /// than returning a `Result`.
    pub fn build(self, required: &[usize]) -> Class {
        let class = Class {
            name: self.name,
            superclass: self.superclass,
            instance_size: self.instance_size,
            vtable: self.vtable,
        };
        for &slot in required {
            assert!(
                class.method(slot).is_some(),
                "class {} missing required vtable slot {}",
                class.name,
                slot
            );
        }
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_VTABLE: &[Option<Method>] = &[Some(1)];
    static BASE: Class = Class {
        name: "Base",
        superclass: None,
        instance_size: 8,
        vtable: BASE_VTABLE,
    };

    #[test]
    fn inherits_method_when_not_overridden() {
        const DERIVED_VTABLE: &[Option<Method>] = &[None];
        let derived = ClassBuilder::new("Derived", 16, DERIVED_VTABLE)
            .extends(&BASE)
            .build(&[0]);
        assert_eq!(derived.method(0), Some(1));
        assert_eq!(derived.own_method(0), None);
    }

    #[test]
    fn is_a_walks_the_chain() {
        const DERIVED_VTABLE: &[Option<Method>] = &[None];
        let derived = ClassBuilder::new("Derived", 16, DERIVED_VTABLE)
            .extends(&BASE)
            .build(&[0]);
        assert!(derived.is_a(&BASE));
        assert!(derived.is_a(&derived));
        assert!(!BASE.is_a(&derived));
    }

    #[test]
    #[should_panic(expected = "missing required vtable slot")]
    fn build_panics_on_missing_required_slot() {
        const EMPTY_VTABLE: &[Option<Method>] = &[None];
        static ROOT: Class = Class {
            name: "Root",
            superclass: None,
            instance_size: 8,
            vtable: EMPTY_VTABLE,
        };
        let _ = ClassBuilder::new("Leaf", 8, EMPTY_VTABLE).extends(&ROOT).build(&[0]);
    }
}
