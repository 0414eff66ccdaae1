//! Control options, merged with defaults once at construction.

use crate::constants::{
    DEFAULT_DIRECTION_COUNT, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_START_ANGLE, DEFAULT_THROTTLE_MS,
};
use crate::direction::{DirectionTable, SliceKey};
use crate::error::StickError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickConfig {
    pub direction_count: usize,
    /// Center of the first slice, radians, counterclockwise from screen
    /// right. The default `-π/2` centers slice 1 at screen-bottom; `π/2`
    /// centers it at the top.
    pub start_angle: f64,
    /// Per-slice labels. When present, overrides `direction_count`.
    pub keys: Option<Vec<SliceKey>>,
    /// Milliseconds between active snapshots; `None` disables throttling.
    #[serde(default = "default_throttle")]
    pub throttle: Option<u64>,
    pub resize_debounce: u64,
}

fn default_throttle() -> Option<u64> {
    Some(DEFAULT_THROTTLE_MS)
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            direction_count: DEFAULT_DIRECTION_COUNT,
            start_angle: DEFAULT_START_ANGLE,
            keys: None,
            throttle: default_throttle(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl StickConfig {
    pub fn with_direction_count(mut self, count: usize) -> Self {
        self.direction_count = count;
        self.keys = None;
        self
    }

    pub fn with_start_angle(mut self, angle: f64) -> Self {
        self.start_angle = angle;
        self
    }

    pub fn with_keys(mut self, keys: Vec<SliceKey>) -> Self {
        self.direction_count = keys.len();
        self.keys = Some(keys);
        self
    }

    pub fn with_throttle(mut self, ms: Option<u64>) -> Self {
        self.throttle = ms;
        self
    }

    /// Number of slices the table will have.
    pub fn slice_count(&self) -> usize {
        self.keys
            .as_ref()
            .map_or(self.direction_count, |keys| keys.len())
    }

    pub fn throttle_interval(&self) -> Result<Option<Duration>, StickError> {
        match self.throttle {
            Some(0) => Err(StickError::ZeroThrottleInterval),
            ms => Ok(ms.map(Duration::from_millis)),
        }
    }

    pub fn resize_debounce_delay(&self) -> Duration {
        Duration::from_millis(self.resize_debounce)
    }

    pub fn direction_table(&self) -> Result<DirectionTable, StickError> {
        match &self.keys {
            Some(keys) => DirectionTable::with_keys(keys, self.start_angle),
            None => DirectionTable::new(self.direction_count, self.start_angle),
        }
    }

    /// Check every option that can be wrong.
    pub fn validate(&self) -> Result<(), StickError> {
        if self.slice_count() < 1 {
            return Err(StickError::InvalidConfiguration(self.slice_count()));
        }
        self.throttle_interval().map(|_| ())
    }
}
