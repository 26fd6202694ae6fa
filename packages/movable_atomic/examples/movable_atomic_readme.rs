//! Example that demonstrates the basic usage of `MovableAtomic`.

use std::sync::atomic::Ordering;

use movable_atomic::MovableAtomic;

fn main() {
    println!("=== Movable Atomic README Example ===");

    let counter = MovableAtomic::new(10_u32);

    // Every operation of AtomicU32 is available.
    counter.fetch_add(5, Ordering::Relaxed);
    println!("Counter: {counter:?}");

    // A snapshot copies the current value into a new, independent atomic.
    let snapshot = counter.snapshot();
    counter.store(0, Ordering::Relaxed);

    println!("Counter after reset: {counter:?}");
    println!("Snapshot taken before reset: {snapshot:?}");
    assert_eq!(snapshot.load(Ordering::Relaxed), 15);

    // Assigning refreshes an existing atomic from another one.
    snapshot.assign_from(&counter);
    assert_eq!(snapshot.load(Ordering::Relaxed), 0);

    println!("README example completed successfully!");
}
