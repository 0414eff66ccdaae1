//! Debounced re-sync of a tracked region on viewport resize.
//!
//! Each resize signal restarts the quiet-period timer; the region re-reads
//! its live rectangle only once resizes stop for `delay`. `stop` cancels the
//! timer and runs the detach hook exactly once.

use crate::geometry::TrackedBox;
use crate::timer::Scheduler;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

type Detach = Box<dyn FnOnce()>;

struct WatchState<S: Scheduler> {
    region: Rc<TrackedBox>,
    delay: Duration,
    scheduler: S,
    active: Cell<bool>,
    pending: RefCell<Option<S::Handle>>,
    detach: RefCell<Option<Detach>>,
}

impl<S> WatchState<S>
where
    S: Scheduler + 'static,
{
    fn notify_resize(self: &Rc<Self>) {
        if !self.active.get() {
            return;
        }
        if let Some(previous) = self.pending.take() {
            self.scheduler.cancel(previous);
        }
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                if !state.active.get() {
                    return;
                }
                log::debug!("[layout] resize settled, re-reading region");
                state.region.resync();
            }),
        );
        self.pending.replace(Some(handle));
    }
}

impl<S: Scheduler> WatchState<S> {
    fn shutdown(&self) {
        self.active.set(false);
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

pub struct LayoutWatch<S: Scheduler> {
    state: Rc<WatchState<S>>,
}

impl<S> LayoutWatch<S>
where
    S: Scheduler + 'static,
{
    pub fn new(region: Rc<TrackedBox>, delay: Duration, scheduler: S) -> Self {
        Self {
            state: Rc::new(WatchState {
                region,
                delay,
                scheduler,
                active: Cell::new(true),
                pending: RefCell::new(None),
                detach: RefCell::new(None),
            }),
        }
    }

    /// Hook run once on `stop`, typically removing the resize listener.
    pub fn on_detach(&self, detach: impl FnOnce() + 'static) {
        self.state.detach.replace(Some(Box::new(detach)));
    }

    /// Weak handle for the resize listener; it never keeps the watch alive.
    pub fn notifier(&self) -> ResizeNotifier<S> {
        ResizeNotifier {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active.get()
    }

    pub fn region(&self) -> &Rc<TrackedBox> {
        &self.state.region
    }

    /// A resize happened: (re)start the quiet-period timer.
    pub fn notify_resize(&self) {
        self.state.notify_resize();
    }

    /// Cancel the timer and detach. Later calls are no-ops.
    pub fn stop(&self) {
        if self.state.active.get() {
            self.state.shutdown();
        }
    }
}

impl<S: Scheduler> Drop for LayoutWatch<S> {
    fn drop(&mut self) {
        self.state.shutdown();
    }
}

pub struct ResizeNotifier<S: Scheduler> {
    state: Weak<WatchState<S>>,
}

impl<S> ResizeNotifier<S>
where
    S: Scheduler + 'static,
{
    /// Forward a resize; no-op once the watch is gone.
    pub fn notify(&self) {
        if let Some(state) = self.state.upgrade() {
            state.notify_resize();
        }
    }
}
