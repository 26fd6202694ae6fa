//! Per-worker state flags of a small thread pool, stored in a growable `Vec`.
//!
//! Worker threads only hold shared references to their own state. Between rounds, the pool
//! grows its worker list (which moves the atomics) and, while a round is running, takes
//! snapshots of the states for reporting without disturbing the workers.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use movable_atomic::{AtomicValue, MovableAtomic};

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
            1 => Self::Running,
            2 => Self::Stopped,
            // Only values written through `into_repr()` are ever stored.
            _ => Self::Idle,
        }
    }
}

#[derive(Debug, Default)]
struct Worker {
    state: MovableAtomic<State>,
    done_processing: MovableAtomic<bool>,
    tasks_completed: MovableAtomic<u32>,
}

impl Worker {
    fn run(&self, tasks: u32) {
        self.state.store(State::Running, Ordering::Release);

        for _ in 0..tasks {
            thread::sleep(Duration::from_millis(1));
            self.tasks_completed.fetch_add(1, Ordering::Relaxed);
        }

        self.done_processing.store(true, Ordering::Release);
        self.state.store(State::Stopped, Ordering::Release);
    }

    /// Point-in-time copy of this worker's flags, for reporting.
    fn snapshot(&self) -> Self {
        Self {
            state: self.state.snapshot(),
            done_processing: self.done_processing.snapshot(),
            tasks_completed: self.tasks_completed.snapshot(),
        }
    }
}

fn print_report(label: &str, workers: &[Worker]) {
    println!("{label}:");

    for (index, worker) in workers.iter().enumerate() {
        println!(
            "  worker {index}: {:?} (done: {}, tasks: {})",
            worker.state.load(Ordering::Acquire),
            worker.done_processing.load(Ordering::Acquire),
            worker.tasks_completed.load(Ordering::Relaxed)
        );
    }
}

fn run_round(workers: &[Worker], tasks_per_worker: u32) {
    thread::scope(|scope| {
        for worker in workers {
            scope.spawn(move || worker.run(tasks_per_worker));
        }

        // The workers keep running while we copy their flags.
        let report: Vec<Worker> = workers.iter().map(Worker::snapshot).collect();
        print_report("Snapshot while running", &report);
    });
}

fn main() {
    let mut workers: Vec<Worker> = Vec::with_capacity(1);
    workers.push(Worker::default());
    workers.push(Worker::default());

    run_round(&workers, 5);
    print_report("After first round", &workers);

    // Growing the pool reallocates the vector, moving every worker's atomics.
    workers.resize_with(4, Worker::default);
    for worker in &workers {
        worker.done_processing.store(false, Ordering::Release);
    }

    run_round(&workers, 3);
    print_report("After second round", &workers);

    let total: u32 = workers
        .into_iter()
        .map(|worker| worker.tasks_completed.into_inner())
        .sum();
    println!("Total tasks completed: {total}");
}
