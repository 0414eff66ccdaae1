//! Value handed to the consumer on every emitted update.

use crate::direction::{Slice, SliceKey};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SliceKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sin: Option<f64>,
}

impl StateSnapshot {
    /// Active state for a normalized `angle` that fell into `slice`.
    pub fn active(slice: &Slice, angle: f64) -> Self {
        Self {
            is_active: true,
            direction: Some(slice.key.clone()),
            angle: Some(angle),
            cos: Some(angle.cos()),
            sin: Some(angle.sin()),
        }
    }

    /// Released state; carries no direction.
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            direction: None,
            angle: None,
            cos: None,
            sin: None,
        }
    }
}
