use std::fmt;
use std::ops::Deref;
use std::sync::atomic::Ordering;

use crate::{AtomicPrimitive, AtomicValue};

type AtomicOf<T> = <<T as AtomicValue>::Repr as AtomicPrimitive>::Atomic;

/// An atomic value that can be snapshot-moved into a new owner.
///
/// Wraps the standard library atomic that stores a `T` (e.g. [`AtomicU32`] for `u32`). All
/// operations of that atomic remain available through [`Deref`]. Types other than [`bool`] and
/// the primitive integers, such as state enums, are stored through their
/// [`AtomicValue::Repr`] primitive; `Deref` then exposes the atomic of that primitive.
///
/// In addition to ordinary Rust moves, which transfer ownership of the whole atomic, this type
/// offers two snapshot operations for when the source must stay where it is (e.g. because other
/// threads hold references to it):
///
/// * [`snapshot()`](Self::snapshot) loads the current value of the source and creates a new
///   atomic holding it.
/// * [`assign_from()`](Self::assign_from) loads the current value of the source and stores it
///   into `self`.
///
/// Both sub-operations are individually atomic but the pair is not. If another thread writes to
/// the source between the load and the store, the destination receives the value seen by the
/// load. Callers that need the destination to match the final value of the source must stop
/// concurrent writers first. All loads and stores in snapshot operations use
/// [`Ordering::SeqCst`].
///
/// # Copying is not supported
///
/// Neither [`Clone`] nor [`Copy`] is implemented. A copy of an atomic is a point-in-time snapshot,
/// so this is only offered under the explicit name [`snapshot()`](Self::snapshot):
///
/// ```rust,compile_fail
/// use movable_atomic::MovableAtomic;
///
/// let counter = MovableAtomic::new(5_i32);
/// let copy: MovableAtomic<i32> = counter.clone();
/// ```
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::Ordering;
///
/// use movable_atomic::MovableAtomic;
///
/// let counter = MovableAtomic::new(5_u32);
///
/// // Operations of AtomicU32 are available directly.
/// counter.fetch_add(2, Ordering::Relaxed);
///
/// let snapshot = counter.snapshot();
/// assert_eq!(snapshot.load(Ordering::Relaxed), 7);
///
/// // The snapshot is independent of the source.
/// counter.store(0, Ordering::Relaxed);
/// assert_eq!(snapshot.load(Ordering::Relaxed), 7);
/// ```
///
/// [`AtomicU32`]: std::sync::atomic::AtomicU32
pub struct MovableAtomic<T: AtomicValue> {
    atomic: AtomicOf<T>,
}

impl<T: AtomicValue> MovableAtomic<T> {
    /// Creates a new atomic holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            atomic: <T::Repr as AtomicPrimitive>::new_atomic(value.into_repr()),
        }
    }

    /// Creates a new atomic holding the current value of `self`.
    ///
    /// Concurrent writes to `self` that happen after the load are not reflected in the
    /// returned atomic.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self::new(self.load(Ordering::SeqCst))
    }

    /// Stores the current value of `source` into `self`.
    ///
    /// This is a load from `source` followed by a separate store into `self`; the pair is not
    /// atomic as a whole.
    pub fn assign_from(&self, source: &Self) {
        self.store(source.load(Ordering::SeqCst), Ordering::SeqCst);
    }

    /// Loads the current value.
    #[must_use]
    pub fn load(&self, order: Ordering) -> T {
        T::from_repr(<T::Repr as AtomicPrimitive>::load(&self.atomic, order))
    }

    /// Stores a new value.
    pub fn store(&self, value: T, order: Ordering) {
        <T::Repr as AtomicPrimitive>::store(&self.atomic, value.into_repr(), order);
    }

    /// Consumes the atomic and returns the value.
    #[must_use]
    pub fn into_inner(self) -> T {
        T::from_repr(<T::Repr as AtomicPrimitive>::into_inner(self.atomic))
    }

    /// Returns a reference to the underlying standard library atomic.
    #[must_use]
    pub fn as_atomic(&self) -> &AtomicOf<T> {
        &self.atomic
    }
}

impl<T: AtomicPrimitive + AtomicValue<Repr = T>> MovableAtomic<T> {
    /// Returns an exclusive reference to the value.
    ///
    /// No atomic operations are needed, as the exclusive borrow guarantees that no other
    /// thread can access the value concurrently. Only available for primitives, which are
    /// stored as themselves.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut T {
        <T as AtomicPrimitive>::get_mut(&mut self.atomic)
    }
}

impl<T: AtomicValue + Default> Default for MovableAtomic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for MovableAtomic<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicValue> Deref for MovableAtomic<T> {
    type Target = AtomicOf<T>;

    fn deref(&self) -> &Self::Target {
        &self.atomic
    }
}

impl<T: AtomicValue> fmt::Debug for MovableAtomic<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MovableAtomic")
            .field(&self.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicI32};
    use std::thread;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(MovableAtomic<i32>: Send, Sync, Default);
    assert_impl_all!(MovableAtomic<bool>: Send, Sync, Default);
    assert_not_impl_any!(MovableAtomic<i32>: Clone, Copy);
    assert_not_impl_any!(MovableAtomic<bool>: Clone, Copy);
    assert_impl_all!(MovableAtomic<State>: Send, Sync, Default);
    assert_not_impl_any!(MovableAtomic<State>: Clone, Copy);

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    enum State {
        #[default]
        Idle,
        Running,
        Stopped,
    }

    impl AtomicValue for State {
        type Repr = u8;

        fn into_repr(self) -> u8 {
            match self {
                Self::Idle => 0,
                Self::Running => 1,
                Self::Stopped => 2,
            }
        }

        fn from_repr(repr: u8) -> Self {
            match repr {
                0 => Self::Idle,
                1 => Self::Running,
                2 => Self::Stopped,
                _ => panic!("invalid state {repr}"),
            }
        }
    }

    #[test]
    fn default_is_value_initialized() {
        let number = MovableAtomic::<i32>::default();
        let flag = MovableAtomic::<bool>::default();

        assert_eq!(number.load(Ordering::SeqCst), 0);
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn new_holds_initial_value() {
        let atomic = MovableAtomic::new(42_i32);

        assert_eq!(atomic.load(Ordering::SeqCst), 42);
        assert_eq!(MovableAtomic::from(7_u8).load(Ordering::SeqCst), 7);
    }

    #[test]
    fn snapshot_of_quiescent_source_has_equal_value() {
        let source = MovableAtomic::new(-17_i32);

        let destination = source.snapshot();

        assert_eq!(destination.load(Ordering::SeqCst), -17);
        assert_eq!(source.load(Ordering::SeqCst), -17);
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let source = MovableAtomic::new(1_u32);
        let destination = source.snapshot();

        source.store(2, Ordering::SeqCst);
        destination.fetch_add(10, Ordering::SeqCst);

        assert_eq!(source.load(Ordering::SeqCst), 2);
        assert_eq!(destination.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn assign_from_copies_current_value() {
        let source = MovableAtomic::new(5_usize);
        let destination = MovableAtomic::new(0_usize);

        destination.assign_from(&source);

        assert_eq!(destination.load(Ordering::SeqCst), 5);
        assert_eq!(source.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn assign_from_self_keeps_value() {
        let atomic = MovableAtomic::new(true);

        atomic.assign_from(&atomic);

        assert!(atomic.load(Ordering::SeqCst));
    }

    #[test]
    fn primitive_operations_are_available() {
        let atomic = MovableAtomic::new(10_i32);

        assert_eq!(atomic.fetch_add(5, Ordering::SeqCst), 10);
        assert_eq!(atomic.swap(1, Ordering::SeqCst), 15);
        assert_eq!(
            atomic.compare_exchange(1, 2, Ordering::SeqCst, Ordering::SeqCst),
            Ok(1)
        );
        assert_eq!(
            atomic.compare_exchange(1, 3, Ordering::SeqCst, Ordering::SeqCst),
            Err(2)
        );
        assert_eq!(
            atomic.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| Some(value * 4)),
            Ok(2)
        );
        assert_eq!(atomic.load(Ordering::SeqCst), 8);

        let atomic: &AtomicI32 = atomic.as_atomic();
        assert_eq!(atomic.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn get_mut_and_into_inner() {
        let mut atomic = MovableAtomic::new(3_u16);

        *atomic.get_mut() = 9;

        assert_eq!(atomic.into_inner(), 9);
    }

    #[test]
    fn enum_value_round_trips_through_repr() {
        let state = MovableAtomic::<State>::default();
        assert_eq!(state.load(Ordering::SeqCst), State::Idle);

        state.store(State::Running, Ordering::SeqCst);
        let snapshot = state.snapshot();
        state.store(State::Stopped, Ordering::SeqCst);

        assert_eq!(snapshot.load(Ordering::SeqCst), State::Running);
        assert_eq!(state.into_inner(), State::Stopped);
    }

    #[test]
    fn enum_value_exposes_repr_atomic() {
        let state = MovableAtomic::new(State::Running);

        assert_eq!(state.swap(2, Ordering::SeqCst), 1);
        assert_eq!(state.load(Ordering::SeqCst), State::Stopped);
        assert_eq!(format!("{state:?}"), "MovableAtomic(Stopped)");
    }

    #[test]
    fn enum_value_assigned_from_another_thread() {
        let workers: Vec<MovableAtomic<State>> =
            (0..4).map(|_| MovableAtomic::new(State::Idle)).collect();

        thread::scope(|scope| {
            for worker in &workers {
                scope.spawn(move || worker.store(State::Stopped, Ordering::SeqCst));
            }
        });

        let next: Vec<MovableAtomic<State>> = workers.iter().map(MovableAtomic::snapshot).collect();

        assert!(next.iter().all(|state| state.load(Ordering::SeqCst) == State::Stopped));
    }

    #[test]
    fn ordinary_move_transfers_ownership() {
        let atomic = MovableAtomic::new(123_u32);

        let moved = atomic;

        assert_eq!(moved.load(Ordering::SeqCst), 123);
    }

    #[test]
    fn debug_shows_current_value() {
        let atomic = MovableAtomic::new(6_u8);

        assert_eq!(format!("{atomic:?}"), "MovableAtomic(6)");
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Spins on a writer thread, too slow under Miri.
    fn snapshot_during_concurrent_writes_sees_a_written_value() {
        const WRITES: u32 = 10_000;

        let source = Arc::new(MovableAtomic::new(0_u32));
        let writer_done = Arc::new(AtomicBool::new(false));

        let writer = thread::spawn({
            let source = Arc::clone(&source);
            let writer_done = Arc::clone(&writer_done);

            move || {
                for value in 1..=WRITES {
                    source.store(value, Ordering::SeqCst);
                }

                writer_done.store(true, Ordering::SeqCst);
            }
        });

        let mut previous = 0;

        while !writer_done.load(Ordering::SeqCst) {
            let snapshot = source.snapshot().into_inner();

            // Values only grow and are never torn.
            assert!(snapshot >= previous);
            assert!(snapshot <= WRITES);
            previous = snapshot;
        }

        writer.join().unwrap();

        assert_eq!(source.snapshot().into_inner(), WRITES);
    }
}
