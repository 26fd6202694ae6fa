#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Atomic values that can be snapshot-moved into new owners.
//!
//! This crate provides [`MovableAtomic<T>`], a wrapper around the standard library atomic that
//! stores a `T`. Besides exposing every operation of the wrapped atomic, it adds an explicit
//! "snapshot move": [`snapshot()`](MovableAtomic::snapshot) creates a new atomic from the
//! current value of a source that stays in place and stays shared, while
//! [`assign_from()`](MovableAtomic::assign_from) does the same into an existing atomic.
//!
//! This is useful when atomics live in collections that are rebuilt or resized while other
//! parties only hold shared references to the old elements, e.g. per-worker state flags in a
//! thread pool.
//!
//! Copying is deliberately not supported. [`Clone`] would hide the fact that the copy is only a
//! point-in-time snapshot that can race with concurrent writers.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::atomic::Ordering;
//!
//! use movable_atomic::MovableAtomic;
//!
//! let states: Vec<MovableAtomic<u8>> = (0..4).map(MovableAtomic::new).collect();
//!
//! // Build a new generation of states from the current values.
//! let next: Vec<MovableAtomic<u8>> = states.iter().map(MovableAtomic::snapshot).collect();
//!
//! states[0].store(100, Ordering::Relaxed);
//!
//! assert_eq!(next[0].load(Ordering::Relaxed), 0);
//! assert_eq!(next[3].load(Ordering::Relaxed), 3);
//! ```
//!
//! # Supported types
//!
//! [`bool`] and the primitive integer types for which the target platform offers atomics, plus
//! any `Copy` type implementing [`AtomicValue`], which stores the value as one of those
//! primitives. This covers state enums:
//!
//! ```rust
//! use std::sync::atomic::Ordering;
//!
//! use movable_atomic::{AtomicValue, MovableAtomic};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum State {
//!     Running,
//!     Stopped,
//! }
//!
//! impl AtomicValue for State {
//!     type Repr = bool;
//!
//!     fn into_repr(self) -> bool {
//!         self == Self::Stopped
//!     }
//!
//!     fn from_repr(stopped: bool) -> Self {
//!         if stopped { Self::Stopped } else { Self::Running }
//!     }
//! }
//!
//! let state = MovableAtomic::new(State::Running);
//! let copy = state.snapshot();
//! state.store(State::Stopped, Ordering::Relaxed);
//!
//! assert_eq!(copy.load(Ordering::Relaxed), State::Running);
//! ```

mod atomic_value;
mod movable_atomic;

pub use atomic_value::*;
pub use movable_atomic::*;
