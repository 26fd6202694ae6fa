use std::borrow::{Borrow, BorrowMut};
use std::cell::UnsafeCell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::pin::Pin;
use std::{fmt, ptr};

/// The alignment of the storage buffer inside every [`FixedCapacitySlot`].
///
/// This is the largest fundamental alignment on mainstream 64-bit platforms. Types with a
/// stricter alignment requirement cannot be stored in a slot.
pub const MAX_ALIGN: usize = 16;

/// Returns `true` if a value of type `T` can be stored in a slot with `CAPACITY` bytes.
///
/// Both the size and the alignment of `T` are considered.
///
/// # Examples
///
/// ```
/// use fixed_capacity_slot::fits;
///
/// assert!(fits::<u64, 8>());
/// assert!(!fits::<[u8; 9], 8>());
/// ```
#[must_use]
pub const fn fits<T, const CAPACITY: usize>() -> bool {
    mem::size_of::<T>() <= CAPACITY && mem::align_of::<T>() <= MAX_ALIGN
}

/// Raw bytes of the slot, aligned for any type that passes [`fits()`].
#[repr(C, align(16))]
struct AlignedBytes<const CAPACITY: usize>([MaybeUninit<u8>; CAPACITY]);

const _: () = assert!(mem::align_of::<AlignedBytes<0>>() == MAX_ALIGN);

impl<const CAPACITY: usize> AlignedBytes<CAPACITY> {
    const fn uninit() -> Self {
        Self([MaybeUninit::uninit(); CAPACITY])
    }
}

/// Owns exactly one `T`, stored inline in a buffer of `CAPACITY` bytes without heap allocation.
///
/// The slot has no empty state: a `T` is constructed when the slot is created and dropped when
/// the slot is dropped. Copy and move style operations are forwarded to the corresponding
/// operations of `T` on the embedded instance:
///
/// | Operation | Forwards to |
/// |---|---|
/// | [`clone()`](Clone::clone) | `T::clone()` |
/// | [`clone_from()`](Clone::clone_from) | `T::clone_from()` on the live value |
/// | [`take()`](Self::take) | `mem::take()`, the source keeps a live `T::default()` |
/// | [`move_assign_from()`](Self::move_assign_from) | assignment into the live value |
/// | drop | `T::drop()`, exactly once |
///
/// A plain Rust move of the slot moves the embedded value along with the buffer. Every access
/// derives a fresh typed pointer from the current address of the buffer, so no pointer into the
/// slot outlives a move.
///
/// # Capacity
///
/// `size_of::<T>()` must not exceed `CAPACITY` and `align_of::<T>()` must not exceed
/// [`MAX_ALIGN`]. This is checked at compile time whenever a slot is constructed:
///
/// ```rust,compile_fail
/// use fixed_capacity_slot::FixedCapacitySlot;
///
/// let slot = FixedCapacitySlot::<[u8; 16], 8>::new([0; 16]);
/// ```
///
/// The same applies to types aligned more strictly than [`MAX_ALIGN`], even if they are small:
///
/// ```rust,compile_fail
/// use fixed_capacity_slot::FixedCapacitySlot;
///
/// #[repr(align(32))]
/// struct OverAligned(u8);
///
/// let slot = FixedCapacitySlot::<OverAligned, 64>::new(OverAligned(1));
/// ```
///
/// # Self-assignment
///
/// Assigning a slot to itself cannot be expressed, as it would require a shared and an exclusive
/// borrow of the same slot at once:
///
/// ```rust,compile_fail
/// use fixed_capacity_slot::FixedCapacitySlot;
///
/// let mut slot = FixedCapacitySlot::<String, 32>::new("hello".to_string());
/// slot.move_assign_from(&mut slot);
/// ```
///
/// # Examples
///
/// ```rust
/// use fixed_capacity_slot::FixedCapacitySlot;
///
/// let original = FixedCapacitySlot::<Vec<u32>, 32>::new(vec![1, 2, 3]);
/// let copy = original.clone();
///
/// assert_eq!(original, copy);
/// assert_eq!(copy.iter().sum::<u32>(), 6);
/// ```
///
/// # Thread safety
///
/// The slot is [`Send`] if `T` is [`Send`] and [`Sync`] if `T` is [`Sync`].
#[repr(C)]
pub struct FixedCapacitySlot<T, const CAPACITY: usize> {
    // UnsafeCell because values with interior mutability are mutated through `&self`.
    bytes: UnsafeCell<AlignedBytes<CAPACITY>>,

    // The slot owns a `T` for the purposes of drop check and auto traits.
    _owns: PhantomData<T>,
}

impl<T, const CAPACITY: usize> FixedCapacitySlot<T, CAPACITY> {
    /// The number of bytes available for the embedded value.
    pub const CAPACITY: usize = CAPACITY;

    /// Creates a new slot that owns `value`.
    ///
    /// Fails to compile if `T` does not fit into the slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_slot::FixedCapacitySlot;
    ///
    /// let slot = FixedCapacitySlot::<u64, 8>::new(42);
    /// assert_eq!(*slot, 42);
    /// ```
    #[must_use]
    pub fn new(value: T) -> Self {
        // SAFETY: The closure initializes the value before returning.
        unsafe {
            Self::new_in_place(|uninit: &mut MaybeUninit<T>| {
                uninit.write(value);
            })
        }
    }

    /// Creates a new slot that owns the value returned by `f`.
    ///
    /// If `f` panics, no slot is created and nothing is dropped.
    #[must_use]
    pub fn new_with(f: impl FnOnce() -> T) -> Self {
        // SAFETY: The closure initializes the value before returning or panics without
        // returning, in which case no slot is ever created.
        unsafe {
            Self::new_in_place(|uninit: &mut MaybeUninit<T>| {
                uninit.write(f());
            })
        }
    }

    /// Creates a new slot, letting `f` initialize the value piece by piece.
    ///
    /// The closure receives a `&mut MaybeUninit<T>` inside the storage of the slot being created,
    /// so the value can be written field by field without first assembling a complete `T`.
    /// The finished slot is then returned by value, which moves it. Addresses observed by the
    /// closure are therefore not the final address of the value. Use
    /// [`init_in_place()`](Self::init_in_place) when the value must be constructed at its
    /// final location.
    ///
    /// If `f` panics, no slot is created and nothing is dropped.
    ///
    /// # Safety
    ///
    /// The closure must fully initialize the `MaybeUninit<T>` before returning.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::mem::MaybeUninit;
    ///
    /// use fixed_capacity_slot::FixedCapacitySlot;
    ///
    /// // SAFETY: The closure initializes the value.
    /// let slot = unsafe {
    ///     FixedCapacitySlot::<[u32; 8], 32>::new_in_place(|uninit: &mut MaybeUninit<[u32; 8]>| {
    ///         uninit.write([7; 8]);
    ///     })
    /// };
    ///
    /// assert_eq!(slot[3], 7);
    /// ```
    #[must_use]
    pub unsafe fn new_in_place(f: impl FnOnce(&mut MaybeUninit<T>)) -> Self {
        let mut slot = MaybeUninit::<Self>::uninit();

        // SAFETY: Forwarding the caller's guarantee that `f` initializes the value.
        unsafe {
            Self::init_in_place(&mut slot, f);
        }

        // SAFETY: `init_in_place()` returned, so the slot holds an initialized value.
        unsafe { slot.assume_init() }
    }

    /// Initializes a slot in caller-provided storage, constructing the value at its final
    /// address.
    ///
    /// The closure receives a `&mut MaybeUninit<T>` pointing into the buffer of the slot inside
    /// `destination`. As long as the caller does not move `destination` afterwards, the address
    /// seen by the closure is the address of the value for the whole lifetime of the slot.
    ///
    /// If `f` panics, `destination` stays uninitialized and nothing is dropped.
    ///
    /// # Safety
    ///
    /// The closure must fully initialize the `MaybeUninit<T>` before returning.
    ///
    /// `destination` never drops its contents on its own. The caller is responsible for dropping
    /// the initialized slot (e.g. via [`MaybeUninit::assume_init_drop()`] or
    /// [`MaybeUninit::assume_init()`]) if the value must not be leaked.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::mem::MaybeUninit;
    /// use std::ptr;
    ///
    /// use fixed_capacity_slot::FixedCapacitySlot;
    ///
    /// let mut storage = MaybeUninit::<FixedCapacitySlot<String, 32>>::uninit();
    /// let constructed_at = Cell::new(ptr::null::<String>());
    ///
    /// // SAFETY: The closure initializes the value.
    /// let slot = unsafe {
    ///     FixedCapacitySlot::init_in_place(&mut storage, |uninit: &mut MaybeUninit<String>| {
    ///         constructed_at.set(uninit.as_ptr());
    ///         uninit.write("placed".to_string());
    ///     })
    /// };
    ///
    /// assert_eq!(slot.as_ptr(), constructed_at.get());
    /// assert_eq!(**slot, "placed");
    ///
    /// // SAFETY: The slot was initialized above and is not used after this.
    /// unsafe {
    ///     storage.assume_init_drop();
    /// }
    /// ```
    pub unsafe fn init_in_place(
        destination: &mut MaybeUninit<Self>,
        f: impl FnOnce(&mut MaybeUninit<T>),
    ) -> &mut Self {
        const {
            assert!(
                fits::<T, CAPACITY>(),
                "the type is too large or too strictly aligned for the slot capacity"
            );
        }

        let slot = destination.as_mut_ptr();

        // SAFETY: `slot` points to storage for a `Self`, so projecting to one of its fields
        // stays in bounds. No reference to the uninitialized memory is created.
        let bytes = UnsafeCell::raw_get(unsafe { &raw mut (*slot).bytes });

        // SAFETY: The buffer is large enough and aligned enough for `T`, as asserted above.
        // MaybeUninit<T> has no validity requirements, so creating a reference is fine.
        let uninit = unsafe { &mut *typed_ptr::<T, CAPACITY>(bytes).cast::<MaybeUninit<T>>() };

        f(uninit);

        // SAFETY: The buffer now holds an initialized `T` (guaranteed by the caller) and the
        // only other field is a zero-sized marker that needs no initialization.
        unsafe { destination.assume_init_mut() }
    }

    /// Returns the number of bytes available for the embedded value.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Returns a pointer to the embedded value.
    ///
    /// The pointer is valid until the slot is moved or dropped. The slot itself never keeps
    /// such a pointer, it derives a fresh one on every access.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        typed_ptr::<T, CAPACITY>(self.bytes.get())
    }

    /// Returns a mutable pointer to the embedded value.
    ///
    /// The pointer is valid until the slot is moved or dropped.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        typed_ptr::<T, CAPACITY>(self.bytes.get_mut())
    }

    /// Returns a shared reference to the embedded value.
    #[must_use]
    pub fn get(&self) -> &T {
        // SAFETY: The slot always holds a live `T` and the buffer is aligned for it. The returned
        // reference borrows the slot, so the value cannot be dropped or moved while it exists.
        unsafe { &*self.as_ptr() }
    }

    /// Returns an exclusive reference to the embedded value.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: The slot always holds a live `T` and the buffer is aligned for it. We hold an
        // exclusive borrow of the slot, so no other reference to the value can exist.
        unsafe { &mut *self.as_mut_ptr() }
    }

    /// Returns a pinned shared reference to the embedded value.
    #[must_use]
    pub fn as_pin(self: Pin<&Self>) -> Pin<&T> {
        // SAFETY: The slot pins its value structurally: the value is never moved out of a
        // pinned slot and is dropped in place.
        unsafe { self.map_unchecked(Self::get) }
    }

    /// Returns a pinned exclusive reference to the embedded value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::pin::pin;
    ///
    /// use fixed_capacity_slot::FixedCapacitySlot;
    ///
    /// let mut slot = pin!(FixedCapacitySlot::<u32, 4>::new(1));
    ///
    /// *slot.as_mut().as_pin_mut() = 2;
    /// assert_eq!(**slot, 2);
    /// ```
    #[must_use]
    pub fn as_pin_mut(self: Pin<&mut Self>) -> Pin<&mut T> {
        // SAFETY: The slot pins its value structurally: methods that move the value out require
        // `&mut Self`, which a pinned slot only hands out when `T: Unpin`.
        unsafe { self.map_unchecked_mut(Self::get_mut) }
    }

    /// Assigns `value` to the embedded value, dropping the previous one.
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }

    /// Replaces the embedded value with `value`, returning the previous one.
    #[must_use = "use `set()` if the previous value is not needed"]
    pub fn replace(&mut self, value: T) -> T {
        mem::replace(self.get_mut(), value)
    }

    /// Consumes the slot and returns the embedded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        let this = ManuallyDrop::new(self);

        // SAFETY: The slot holds a live `T`. The slot is never dropped, so the value we read
        // becomes the only owner.
        unsafe { this.as_ptr().read() }
    }
}

impl<T: Default, const CAPACITY: usize> FixedCapacitySlot<T, CAPACITY> {
    /// Moves the embedded value into a new slot, leaving `T::default()` behind.
    ///
    /// The source slot remains occupied and usable afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_slot::FixedCapacitySlot;
    ///
    /// let mut source = FixedCapacitySlot::<Vec<u8>, 32>::new(vec![1, 2, 3]);
    /// let destination = source.take();
    ///
    /// assert_eq!(*destination, [1, 2, 3]);
    /// assert!(source.is_empty());
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self::new(mem::take(self.get_mut()))
    }

    /// Moves the value embedded in `source` into this slot's live value, leaving
    /// `T::default()` in `source`.
    ///
    /// The previous value of this slot is dropped by the assignment.
    pub fn move_assign_from(&mut self, source: &mut Self) {
        *self.get_mut() = mem::take(source.get_mut());
    }
}

/// Derives a typed pointer to the value from the address of the buffer.
///
/// The buffer is aligned to `MAX_ALIGN` and `fits()` is asserted before any value is stored.
fn typed_ptr<T, const CAPACITY: usize>(bytes: *mut AlignedBytes<CAPACITY>) -> *mut T {
    bytes.cast::<T>()
}

impl<T, const CAPACITY: usize> Drop for FixedCapacitySlot<T, CAPACITY> {
    fn drop(&mut self) {
        // SAFETY: The slot holds a live `T` that is dropped exactly once, here. The buffer is
        // never read again after this.
        unsafe {
            ptr::drop_in_place(self.as_mut_ptr());
        }
    }
}

impl<T: Clone, const CAPACITY: usize> Clone for FixedCapacitySlot<T, CAPACITY> {
    fn clone(&self) -> Self {
        Self::new_with(|| self.get().clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.get_mut().clone_from(source.get());
    }
}

impl<T: Default, const CAPACITY: usize> Default for FixedCapacitySlot<T, CAPACITY> {
    fn default() -> Self {
        Self::new_with(T::default)
    }
}

impl<T, const CAPACITY: usize> From<T> for FixedCapacitySlot<T, CAPACITY> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, const CAPACITY: usize> Deref for FixedCapacitySlot<T, CAPACITY> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

impl<T, const CAPACITY: usize> DerefMut for FixedCapacitySlot<T, CAPACITY> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_mut()
    }
}

impl<T, const CAPACITY: usize> AsRef<T> for FixedCapacitySlot<T, CAPACITY> {
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T, const CAPACITY: usize> AsMut<T> for FixedCapacitySlot<T, CAPACITY> {
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const CAPACITY: usize> Borrow<T> for FixedCapacitySlot<T, CAPACITY> {
    fn borrow(&self) -> &T {
        self.get()
    }
}

impl<T, const CAPACITY: usize> BorrowMut<T> for FixedCapacitySlot<T, CAPACITY> {
    fn borrow_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: PartialEq, const CAPACITY: usize> PartialEq for FixedCapacitySlot<T, CAPACITY> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq, const CAPACITY: usize> Eq for FixedCapacitySlot<T, CAPACITY> {}

impl<T: PartialOrd, const CAPACITY: usize> PartialOrd for FixedCapacitySlot<T, CAPACITY> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.get().partial_cmp(other.get())
    }
}

impl<T: Ord, const CAPACITY: usize> Ord for FixedCapacitySlot<T, CAPACITY> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(other.get())
    }
}

impl<T: Hash, const CAPACITY: usize> Hash for FixedCapacitySlot<T, CAPACITY> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

impl<T: fmt::Debug, const CAPACITY: usize> fmt::Debug for FixedCapacitySlot<T, CAPACITY> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.get(), f)
    }
}

impl<T: fmt::Display, const CAPACITY: usize> fmt::Display for FixedCapacitySlot<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}

// SAFETY: The slot only hands out `&T` through `&self`, so sharing the slot between threads is
// exactly as safe as sharing a `T`. The UnsafeCell only exists to permit interior mutability
// of `T` itself.
unsafe impl<T: Sync, const CAPACITY: usize> Sync for FixedCapacitySlot<T, CAPACITY> {}
