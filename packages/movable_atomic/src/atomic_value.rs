use std::fmt;
use std::sync::atomic::{
    AtomicBool, AtomicI8, AtomicI16, AtomicI32, AtomicIsize, AtomicU8, AtomicU16, AtomicU32,
    AtomicUsize, Ordering,
};
#[cfg(target_has_atomic = "64")]
use std::sync::atomic::{AtomicI64, AtomicU64};

mod private {
    #[allow(
        unnameable_types,
        unreachable_pub,
        reason = "sealed trait pattern, outside crates must not implement AtomicPrimitive"
    )]
    pub trait Sealed {}
}

/// A primitive type that has a standard library atomic counterpart.
///
/// This trait is sealed and implemented for [`bool`] and the primitive integer types supported
/// by atomics on the target platform. It connects a primitive with the atomic type that stores
/// it. Other value types are stored by mapping them to one of these primitives through
/// [`AtomicValue`].
pub trait AtomicPrimitive: Copy + fmt::Debug + private::Sealed {
    /// The standard library atomic type that stores values of this type.
    type Atomic: fmt::Debug + Send + Sync;

    /// Creates a new atomic holding `value`.
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Loads the current value of `atomic`.
    fn load(atomic: &Self::Atomic, order: Ordering) -> Self;

    /// Stores `value` into `atomic`.
    fn store(atomic: &Self::Atomic, value: Self, order: Ordering);

    /// Consumes `atomic` and returns the value it holds.
    fn into_inner(atomic: Self::Atomic) -> Self;

    /// Returns an exclusive reference to the value held by `atomic`.
    fn get_mut(atomic: &mut Self::Atomic) -> &mut Self;
}

/// A value type that can be stored in a [`MovableAtomic<T>`](crate::MovableAtomic).
///
/// Every value is stored as its [`Repr`](Self::Repr) primitive. The primitives themselves
/// implement this trait with `Repr = Self`. Implement it for your own small `Copy` types, such
/// as state enums, by converting to and from a primitive.
///
/// The stored primitive is reachable through [`Deref`](std::ops::Deref) on the wrapper, so
/// [`from_repr()`](Self::from_repr) may be called with any value of `Repr`, not only with values
/// returned by [`into_repr()`](Self::into_repr).
///
/// # Examples
///
/// ```
/// use std::sync::atomic::Ordering;
///
/// use movable_atomic::{AtomicValue, MovableAtomic};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum Light {
///     Off,
///     On,
/// }
///
/// impl AtomicValue for Light {
///     type Repr = bool;
///
///     fn into_repr(self) -> bool {
///         matches!(self, Self::On)
///     }
///
///     fn from_repr(repr: bool) -> Self {
///         if repr { Self::On } else { Self::Off }
///     }
/// }
///
/// let light = MovableAtomic::new(Light::Off);
/// light.store(Light::On, Ordering::Relaxed);
///
/// assert_eq!(light.snapshot().load(Ordering::Relaxed), Light::On);
/// ```
pub trait AtomicValue: Copy + fmt::Debug {
    /// The primitive that values of this type are stored as.
    type Repr: AtomicPrimitive;

    /// Converts the value into its stored primitive.
    fn into_repr(self) -> Self::Repr;

    /// Converts a stored primitive back into a value.
    fn from_repr(repr: Self::Repr) -> Self;
}

macro_rules! impl_atomic_value {
    ($($value:ty => $atomic:ty),+ $(,)?) => {
        $(
            impl private::Sealed for $value {}

            impl AtomicPrimitive for $value {
                type Atomic = $atomic;

                #[inline]
                fn new_atomic(value: Self) -> Self::Atomic {
                    <$atomic>::new(value)
                }

                #[inline]
                fn load(atomic: &Self::Atomic, order: Ordering) -> Self {
                    atomic.load(order)
                }

                #[inline]
                fn store(atomic: &Self::Atomic, value: Self, order: Ordering) {
                    atomic.store(value, order);
                }

                #[inline]
                fn into_inner(atomic: Self::Atomic) -> Self {
                    atomic.into_inner()
                }

                #[inline]
                fn get_mut(atomic: &mut Self::Atomic) -> &mut Self {
                    atomic.get_mut()
                }
            }

            impl AtomicValue for $value {
                type Repr = Self;

                #[inline]
                fn into_repr(self) -> Self {
                    self
                }

                #[inline]
                fn from_repr(repr: Self) -> Self {
                    repr
                }
            }
        )+
    };
}

impl_atomic_value!(
    bool => AtomicBool,
    u8 => AtomicU8,
    u16 => AtomicU16,
    u32 => AtomicU32,
    usize => AtomicUsize,
    i8 => AtomicI8,
    i16 => AtomicI16,
    i32 => AtomicI32,
    isize => AtomicIsize,
);

#[cfg(target_has_atomic = "64")]
impl_atomic_value!(
    u64 => AtomicU64,
    i64 => AtomicI64,
);
