#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Heap-free inline storage for exactly one value, with a capacity fixed at compile time.
//!
//! This crate provides [`FixedCapacitySlot<T, CAPACITY>`], a container that embeds one `T` in
//! a byte buffer of `CAPACITY` bytes that lives inside the slot itself. The footprint of the
//! slot depends only on `CAPACITY`, so a public handle type can keep a fixed size while the
//! type it owns grows or shrinks, as long as it keeps fitting.
//!
//! # Key Features
//!
//! - **No heap allocation**: The value is stored inline, the slot never allocates or reallocates
//! - **Always occupied**: A slot holds exactly one live `T` from construction until it is dropped
//! - **Compile-time capacity check**: Instantiating a slot with a `T` that is too large or too
//!   strictly aligned is a compile error, never a silent buffer overflow
//! - **Value semantics delegated to `T`**: Cloning, assignment and dropping call the
//!   corresponding operations of `T` on the embedded instance
//! - **Pinning support**: The slot pins its contents structurally, see
//!   [`as_pin_mut()`](FixedCapacitySlot::as_pin_mut)
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use fixed_capacity_slot::FixedCapacitySlot;
//!
//! let mut slot = FixedCapacitySlot::<String, 64>::new("hello".to_string());
//!
//! // Access the value through Deref.
//! assert_eq!(&*slot, "hello");
//! assert_eq!(slot.len(), 5);
//!
//! slot.push_str(", world");
//! assert_eq!(&*slot, "hello, world");
//! ```
//!
//! ## Moving out while the source stays live
//!
//! [`take()`](FixedCapacitySlot::take) moves the value into a new slot and leaves the source
//! holding the moved-from value, which is `T::default()`.
//!
//! ```rust
//! use fixed_capacity_slot::FixedCapacitySlot;
//!
//! let mut first = FixedCapacitySlot::<String, 64>::new("hello".to_string());
//! let second = first.take();
//!
//! assert_eq!(&*second, "hello");
//! assert!(first.is_empty());
//! ```
//!
//! ## Capacity violations do not compile
//!
//! ```rust,compile_fail
//! use fixed_capacity_slot::FixedCapacitySlot;
//!
//! struct BigType([u64; 4]);
//!
//! // 32 bytes of data do not fit into 8 bytes of capacity.
//! let slot = FixedCapacitySlot::<BigType, 8>::new(BigType([0; 4]));
//! ```
//!
//! # Thread safety
//!
//! The slot adds no synchronization of its own. It is [`Send`] if `T` is [`Send`] and [`Sync`]
//! if `T` is [`Sync`], exactly like a bare `T`.

mod slot;

pub use slot::*;
