//! Wiring: session -> geometry -> direction table -> snapshot -> throttle.
//!
//! `dispatch` applies every state change first and hands back the snapshots
//! to deliver, so a consumer callback that feeds more input straight back in
//! sees a consistent controller.

use crate::config::StickConfig;
use crate::direction::{DirectionTable, SliceKey};
use crate::error::StickError;
use crate::geometry::{Point, TrackedBox};
use crate::session::{TouchEvent, TouchId, TouchSession};
use crate::state::StateSnapshot;
use crate::throttle::ThrottleGate;
use crate::timer::Scheduler;
use smallvec::SmallVec;
use std::rc::Rc;

pub type Emissions = SmallVec<[StateSnapshot; 2]>;

pub struct Controller<S: Scheduler> {
    config: StickConfig,
    table: DirectionTable,
    region: Rc<TrackedBox>,
    session: TouchSession,
    gate: ThrottleGate<S>,
    scheduler: S,
    enabled: bool,
}

impl<S> Controller<S>
where
    S: Scheduler + Clone,
    S::Handle: 'static,
{
    /// Build an enabled controller. Fails if `config` cannot produce a table.
    pub fn new(
        config: StickConfig,
        region: Rc<TrackedBox>,
        scheduler: S,
    ) -> Result<Self, StickError> {
        config.validate()?;
        let table = config.direction_table()?;
        let gate = ThrottleGate::new(config.throttle_interval()?, scheduler.clone());
        log::debug!(
            "[stick] {} directions, throttle={:?}",
            table.len(),
            gate.interval()
        );
        Ok(Self {
            config,
            table,
            region,
            session: TouchSession::new(),
            gate,
            scheduler,
            enabled: true,
        })
    }

    pub fn config(&self) -> &StickConfig {
        &self.config
    }

    pub fn table(&self) -> &DirectionTable {
        &self.table
    }

    pub fn region(&self) -> &Rc<TrackedBox> {
        &self.region
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tracking(&self) -> Option<TouchId> {
        self.session.tracking()
    }

    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.session.reset();
        self.gate.reset();
        self.region.invalidate();
        self.enabled = true;
        log::info!("[stick] enabled");
    }

    /// After this returns nothing is emitted until `enable`.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.session.reset();
        self.gate.reset();
        log::info!("[stick] disabled");
    }

    /// Swap in a new configuration. On error the current one stays in force.
    pub fn reconfigure(&mut self, config: StickConfig) -> Result<(), StickError> {
        config.validate()?;
        let table = config.direction_table()?;
        let interval = config.throttle_interval()?;
        if interval != self.gate.interval() {
            self.gate = ThrottleGate::new(interval, self.scheduler.clone());
        }
        self.table = table;
        self.config = config;
        Ok(())
    }

    pub fn set_direction_count(&mut self, count: usize) -> Result<(), StickError> {
        self.reconfigure(self.config.clone().with_direction_count(count))
    }

    pub fn set_start_angle(&mut self, angle: f64) -> Result<(), StickError> {
        self.reconfigure(self.config.clone().with_start_angle(angle))
    }

    pub fn set_keys(&mut self, keys: Vec<SliceKey>) -> Result<(), StickError> {
        self.reconfigure(self.config.clone().with_keys(keys))
    }

    pub fn set_throttle(&mut self, ms: Option<u64>) -> Result<(), StickError> {
        self.reconfigure(self.config.clone().with_throttle(ms))
    }

    /// Active snapshot for a page-space point, before any throttling.
    pub fn compute(&self, page_point: Point) -> Option<StateSnapshot> {
        let angle = self.region.angle_of(page_point);
        let slice = self.table.classify(angle)?;
        Some(StateSnapshot::active(slice, angle))
    }

    /// Feed one input batch; returns the snapshots to deliver, in order.
    pub fn dispatch(&mut self, event: &TouchEvent) -> Emissions {
        let mut out = Emissions::new();
        if !self.enabled {
            return out;
        }
        for trigger in self.session.handle(event) {
            // release always gets through so the consumer never sees a stale active state
            if trigger.kind.ends_gesture() {
                // next gesture's first snapshot must not hit a closed gate
                self.gate.reset();
                out.push(StateSnapshot::inactive());
                continue;
            }
            let Some(snapshot) = self.compute(trigger.touch.point) else {
                log::warn!("[stick] unclassifiable point {:?}", trigger.touch.point);
                continue;
            };
            if self.gate.admit() {
                out.push(snapshot);
            }
        }
        out
    }

    /// `dispatch`, then hand each snapshot to `emit`.
    pub fn handle(&mut self, event: &TouchEvent, mut emit: impl FnMut(StateSnapshot)) {
        for snapshot in self.dispatch(event) {
            emit(snapshot);
        }
    }
}

/// Hand `emissions` to `emit` in order, stopping as soon as `live` reports
/// the control is gone. `live` is checked before every snapshot, so a
/// consumer that disables the control mid-batch sees nothing further.
pub fn deliver_while(
    emissions: Emissions,
    mut live: impl FnMut() -> bool,
    mut emit: impl FnMut(StateSnapshot),
) {
    for snapshot in emissions {
        if !live() {
            log::debug!("[stick] disabled mid-batch; dropping remaining snapshots");
            return;
        }
        emit(snapshot);
    }
}
