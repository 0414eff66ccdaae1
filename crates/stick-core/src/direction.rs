//! Partition of the full turn into N congruent slices.
//!
//! Boundaries are computed once and shared between neighbours, so the end of
//! slice `i` and the start of slice `i + 1` are bit-identical. Membership is
//! `(start, end]`: an angle sitting exactly on a boundary belongs to the slice
//! whose `end_angle` it is.

use crate::angle::normalize;
use crate::constants::{DEFAULT_DIRECTION_COUNT, DEFAULT_START_ANGLE};
use crate::error::StickError;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Label reported for a slice: its 1-based position, or a caller-supplied name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliceKey {
    Index(usize),
    Named(String),
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceKey::Index(i) => write!(f, "{i}"),
            SliceKey::Named(name) => f.write_str(name),
        }
    }
}

impl From<usize> for SliceKey {
    fn from(i: usize) -> Self {
        SliceKey::Index(i)
    }
}

impl From<&str> for SliceKey {
    fn from(name: &str) -> Self {
        SliceKey::Named(name.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub start_angle: f64,
    pub end_angle: f64,
    pub key: SliceKey,
}

impl Slice {
    /// True when the slice straddles the `0/2π` point.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.start_angle > self.end_angle
    }

    /// Membership under the `(start, end]` rule.
    pub fn contains(&self, angle: f64) -> bool {
        // only a lone slice has start == end; it spans the whole turn
        if self.start_angle == self.end_angle {
            return !angle.is_nan();
        }
        if self.wraps() {
            angle > self.start_angle || angle <= self.end_angle
        } else {
            self.start_angle < angle && angle <= self.end_angle
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirectionTable {
    slices: Vec<Slice>,
    start_angle: f64,
}

impl Default for DirectionTable {
    fn default() -> Self {
        let slices = build_slices(DEFAULT_DIRECTION_COUNT, DEFAULT_START_ANGLE, None);
        Self {
            slices,
            start_angle: DEFAULT_START_ANGLE,
        }
    }
}

impl DirectionTable {
    /// Build `slice_count` slices with slice 0 centered on `start_angle`.
    pub fn new(slice_count: usize, start_angle: f64) -> Result<Self, StickError> {
        if slice_count < 1 {
            return Err(StickError::InvalidConfiguration(slice_count));
        }
        Ok(Self {
            slices: build_slices(slice_count, start_angle, None),
            start_angle,
        })
    }

    /// Build one slice per key, labelled with that key.
    pub fn with_keys(keys: &[SliceKey], start_angle: f64) -> Result<Self, StickError> {
        if keys.is_empty() {
            return Err(StickError::InvalidConfiguration(0));
        }
        Ok(Self {
            slices: build_slices(keys.len(), start_angle, Some(keys)),
            start_angle,
        })
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[inline]
    pub fn slice_width(&self) -> f64 {
        TAU / self.slices.len() as f64
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Slice holding a normalized `angle`. `None` only for NaN.
    pub fn classify(&self, angle: f64) -> Option<&Slice> {
        if angle.is_nan() {
            return None;
        }
        self.slices.iter().find(|s| s.contains(angle))
    }
}

fn build_slices(count: usize, start_angle: f64, keys: Option<&[SliceKey]>) -> Vec<Slice> {
    let width = TAU / count as f64;
    let first = start_angle - width / 2.0;
    let boundaries: Vec<f64> = (0..count)
        .map(|i| normalize(first + i as f64 * width))
        .collect();

    (0..count)
        .map(|i| Slice {
            start_angle: boundaries[i],
            end_angle: boundaries[(i + 1) % count],
            key: keys
                .and_then(|k| k.get(i).cloned())
                .unwrap_or(SliceKey::Index(i + 1)),
        })
        .collect()
}
