//! Leaky-bucket-of-one rate limiter.
//!
//! An open gate lets one call through and closes; it reopens `interval` after
//! that call. Calls made while closed are dropped, never replayed. Without an
//! interval every call passes.

use crate::timer::Scheduler;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

struct GateState<H> {
    open: Cell<bool>,
    pending: RefCell<Option<H>>,
}

pub struct ThrottleGate<S: Scheduler> {
    interval: Option<Duration>,
    scheduler: S,
    state: Rc<GateState<S::Handle>>,
}

impl<S> ThrottleGate<S>
where
    S: Scheduler,
    S::Handle: 'static,
{
    pub fn new(interval: Option<Duration>, scheduler: S) -> Self {
        Self {
            interval,
            scheduler,
            state: Rc::new(GateState {
                open: Cell::new(true),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_open(&self) -> bool {
        self.interval.is_none() || self.state.open.get()
    }

    /// Take the gate for one call. Returns `false` when the call must be dropped.
    pub fn admit(&self) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        if !self.state.open.get() {
            log::trace!("[throttle] dropped call while closed");
            return false;
        }
        self.state.open.set(false);

        // the task only holds a weak ref, so a discarded gate stays discarded
        let weak = Rc::downgrade(&self.state);
        let handle = self.scheduler.schedule(
            interval,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.open.set(true);
                }
            }),
        );
        self.state.pending.replace(Some(handle));
        true
    }

    /// Run `f` if the gate admits the call.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        self.admit().then(f)
    }

    /// Cancel any reopen timer and leave the gate open.
    pub fn reset(&self) {
        if let Some(handle) = self.state.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.state.open.set(true);
    }
}

impl<S: Scheduler> Drop for ThrottleGate<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
