//! Object/class runtime: single-inheritance classes with a manually built
//! vtable, and reference-counted object instances built on top of them.
//!
//! There is no dynamic class loading (out of scope): every `Class` is a
//! `'static` descriptor built once, at link time, by [`class::ClassBuilder`].

pub mod class;
pub mod object;

pub use class::{Class, ClassBuilder, Method};
pub use object::{Object, ObjectHeader};
