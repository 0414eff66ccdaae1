//! One-shot timers behind a trait so the core stays platform-free.
//!
//! The web front-end backs `Scheduler` with `setTimeout`. `ManualScheduler`
//! is a virtual clock for host-side use: time only moves when `advance` is
//! called, and due tasks run in deadline order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    type Handle;

    /// Run `task` once after `delay`. Fire-and-forget: nothing awaits it.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Prevent a scheduled task from running. Harmless after it has run.
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Pending {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

/// Deterministic scheduler driven by explicit `advance` calls.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<Clock>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.now.get()
    }

    pub fn pending(&self) -> usize {
        self.clock.queue.borrow().len()
    }

    /// Move the clock forward, running every task that falls due on the way.
    ///
    /// Tasks may schedule further tasks; those run too if they fall due
    /// before the new time.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(next) = self.take_next_due(target) {
            self.clock.now.set(next.due);
            (next.task)();
        }
        self.clock.now.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    fn take_next_due(&self, target: Duration) -> Option<Pending> {
        let mut queue = self.clock.queue.borrow_mut();
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id.0))
            .map(|(i, _)| i)?;
        Some(queue.remove(idx))
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.clock.next_id.get());
        self.clock.next_id.set(id.0 + 1);
        self.clock.queue.borrow_mut().push(Pending {
            id,
            due: self.now() + delay,
            task,
        });
        id
    }

    fn cancel(&self, handle: TimerId) {
        self.clock.queue.borrow_mut().retain(|p| p.id != handle);
    }
}
