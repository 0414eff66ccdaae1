//! Touch-session state machine.
//!
//! Owns the single tracked touch identifier and turns batches of changed
//! touches into zero or more compute triggers. The session never looks at
//! geometry; it only decides which touch drives the gesture and when the
//! gesture ends.

use crate::geometry::Point;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    /// Page-space position.
    pub point: Point,
}

impl Touch {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            point: Point::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    /// Treated exactly like `End`.
    Cancel,
}

pub type TouchList = SmallVec<[Touch; 4]>;

/// One batch from the input source.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub changed: TouchList,
    /// Touches still on the target. Only consulted for end/cancel.
    pub remaining: TouchList,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, changed: &[Touch]) -> Self {
        Self {
            phase,
            changed: changed.iter().copied().collect(),
            remaining: TouchList::new(),
        }
    }

    pub fn start(changed: &[Touch]) -> Self {
        Self::new(TouchPhase::Start, changed)
    }

    pub fn moved(changed: &[Touch]) -> Self {
        Self::new(TouchPhase::Move, changed)
    }

    pub fn end(changed: &[Touch], remaining: &[Touch]) -> Self {
        Self {
            remaining: remaining.iter().copied().collect(),
            ..Self::new(TouchPhase::End, changed)
        }
    }

    pub fn cancel(changed: &[Touch], remaining: &[Touch]) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            ..Self::end(changed, remaining)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    Start,
    Move,
    /// Tracking moved to another touch still on the target.
    Handoff,
    End,
}

impl TriggerKind {
    #[inline]
    pub fn ends_gesture(self) -> bool {
        matches!(self, TriggerKind::End)
    }
}

/// Request to compute a state from `touch`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub touch: Touch,
}

pub type Triggers = SmallVec<[Trigger; 2]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Tracking(TouchId),
}

#[derive(Debug, Default)]
pub struct TouchSession {
    state: SessionState,
}

impl TouchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tracking(&self) -> Option<TouchId> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Tracking(id) => Some(id),
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking().is_some()
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    pub fn handle(&mut self, event: &TouchEvent) -> Triggers {
        match event.phase {
            TouchPhase::Start => self.on_start(&event.changed),
            TouchPhase::Move => self.on_move(&event.changed),
            TouchPhase::End | TouchPhase::Cancel => self.on_end(&event.changed, &event.remaining),
        }
    }

    pub fn on_start(&mut self, changed: &[Touch]) -> Triggers {
        let mut out = Triggers::new();
        if self.is_tracking() {
            return out;
        }
        if let Some(touch) = changed.first().copied() {
            self.state = SessionState::Tracking(touch.id);
            log::debug!("[session] tracking touch {}", touch.id.0);
            out.push(Trigger {
                kind: TriggerKind::Start,
                touch,
            });
        }
        out
    }

    pub fn on_move(&mut self, changed: &[Touch]) -> Triggers {
        let Some(id) = self.tracking() else {
            return Triggers::new();
        };
        changed
            .iter()
            .filter(|t| t.id == id)
            .map(|&touch| Trigger {
                kind: TriggerKind::Move,
                touch,
            })
            .collect()
    }

    pub fn on_end(&mut self, changed: &[Touch], remaining: &[Touch]) -> Triggers {
        let mut out = Triggers::new();
        for lifted in changed {
            let Some(id) = self.tracking() else {
                break;
            };
            if lifted.id != id {
                continue;
            }

            let mut handed_off = false;
            for &candidate in remaining.iter().filter(|t| t.id != id) {
                self.state = SessionState::Tracking(candidate.id);
                handed_off = true;
                out.push(Trigger {
                    kind: TriggerKind::Handoff,
                    touch: candidate,
                });
            }

            if handed_off {
                log::debug!(
                    "[session] touch {} lifted, handed off to {:?}",
                    id.0,
                    self.tracking().map(|t| t.0)
                );
            } else {
                self.state = SessionState::Idle;
                log::debug!("[session] touch {} lifted, gesture ended", id.0);
                out.push(Trigger {
                    kind: TriggerKind::End,
                    touch: *lifted,
                });
            }
        }
        out
    }
}
