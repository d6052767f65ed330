//! Gripper description and the stroke admissibility filter.
use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a gripper part, in the part's local frame:
/// `width` along x, `extent` along the lateral (y) axis, `height` along the
/// approach (z) axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxDims {
    pub width: f64,
    pub extent: f64,
    pub height: f64,
}

impl BoxDims {
    pub fn new(width: f64, extent: f64, height: f64) -> Self {
        Self {
            width,
            extent,
            height,
        }
    }
}

/// Two-finger gripper: stroke interval, finger box, optional body box and
/// the transform from the nominal reference frame to the fingertips.
///
/// Immutable once constructed; share it read-only across checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gripper {
    /// Smallest commandable jaw separation [m].
    pub min_stroke: f64,
    /// Largest commandable jaw separation [m].
    pub max_stroke: f64,
    /// Bounding box around each finger.
    pub finger: BoxDims,
    /// Bounding box around the gripper body, mounted above the fingers.
    pub body: Option<BoxDims>,
    /// Nominal reference frame → fingertip frame. Not applied implicitly:
    /// compose it onto a candidate pose (`pose * gripper.tip_offset`) when
    /// the candidate is given at the flange.
    pub tip_offset: Isometry3<f64>,
}

impl Gripper {
    pub fn new(min_stroke: f64, max_stroke: f64, finger: BoxDims) -> Self {
        Self {
            min_stroke,
            max_stroke,
            finger,
            body: None,
            tip_offset: Isometry3::identity(),
        }
    }

    pub fn with_body(mut self, body: BoxDims) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_tip_offset(mut self, tip_offset: Isometry3<f64>) -> Self {
        self.tip_offset = tip_offset;
        self
    }

    /// Whether a jaw separation is commandable, inclusive on both ends.
    #[inline]
    pub fn admits(&self, width: f64) -> bool {
        self.min_stroke <= width && width <= self.max_stroke
    }

    /// Per-candidate admissibility over a batch of jaw separations. Pure;
    /// used to discard candidates before any rendering.
    pub fn consider_indices(&self, widths: &[f64]) -> Vec<bool> {
        widths.iter().map(|&w| self.admits(w)).collect()
    }
}
