//! Verifies that slot operations never allocate memory themselves.
//!
//! Only the embedded values may allocate; the slot stores them inline.

#![cfg(not(miri))] // Miri replaces the global allocator, so cannot be used here.

use std::hint::black_box;

use alloc_tracker::{Allocator, Session};
use fixed_capacity_slot::FixedCapacitySlot;

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

const ITERATIONS: u64 = 10;

fn assert_no_allocations(session: &Session) {
    let report = session.to_report();

    let operations: Vec<_> = report.operations().collect();
    assert!(!operations.is_empty(), "no operations were measured");

    for (name, operation) in operations {
        assert_eq!(operation.total_iterations(), ITERATIONS, "{name}");
        assert_eq!(
            operation.total_bytes_allocated(),
            0,
            "operation {name} allocated memory"
        );
    }
}

#[test]
fn lifecycle_of_plain_values_does_not_allocate() {
    let session = Session::new();

    {
        let op = session.operation("construct_and_drop");
        let _span = op.measure_thread().iterations(ITERATIONS);

        for i in 0..ITERATIONS {
            let slot = FixedCapacitySlot::<u64, 8>::new(black_box(i));
            black_box(&slot);
        }
    }

    {
        let op = session.operation("clone_take_assign");
        let _span = op.measure_thread().iterations(ITERATIONS);

        for i in 0..ITERATIONS {
            let mut source = FixedCapacitySlot::<[u64; 16], 128>::new([i; 16]);
            let copy = source.clone();
            let mut taken = source.take();
            taken.move_assign_from(&mut source);
            source.clone_from(&copy);
            black_box((source, copy, taken));
        }
    }

    assert_no_allocations(&session);
}

#[test]
fn moving_slots_does_not_allocate() {
    let session = Session::new();

    let mut slots = Vec::with_capacity(2);

    {
        let op = session.operation("move_into_preallocated_vec");
        let _span = op.measure_thread().iterations(ITERATIONS);

        for i in 0..ITERATIONS {
            slots.push(FixedCapacitySlot::<u32, 16>::new(black_box(7)));
            let slot = slots.pop().expect("we just pushed a slot");
            assert_eq!(*slot, 7);
            black_box(i);
        }
    }

    assert_no_allocations(&session);
}
