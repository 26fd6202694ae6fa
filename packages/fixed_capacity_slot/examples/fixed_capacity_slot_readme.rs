//! Example that demonstrates the basic usage of `FixedCapacitySlot`.
//!
//! This shows construction, access, cloning and moving values between slots.

use fixed_capacity_slot::FixedCapacitySlot;

fn main() {
    println!("=== Fixed Capacity Slot README Example ===");

    // The String is stored inline, inside the 64 bytes of the slot itself.
    let mut greeting = FixedCapacitySlot::<String, 64>::new("hello".to_string());
    println!("Slot holds: {greeting}");
    println!(
        "Slot footprint: {} bytes, capacity: {} bytes",
        size_of_val(&greeting),
        greeting.capacity()
    );

    // Cloning forwards to String::clone().
    let copy = greeting.clone();
    assert_eq!(copy, greeting);

    // Taking moves the String out and leaves an empty String behind.
    let moved = greeting.take();
    println!("Moved value: {moved}");
    println!("Source after move: {greeting:?}");
    assert_eq!(*moved, "hello");
    assert!(greeting.is_empty());

    // The source slot is still occupied and usable.
    greeting.push_str("hello again");
    println!("Source reused: {greeting}");

    println!("README example completed successfully!");
}
