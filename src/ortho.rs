//! Orthographic depth image and its value/metric codec.
//!
//! An [`OrthographicImage`] stores a top-down view of the scene as a grid of
//! quantized depth samples plus the scalar metadata needed to interpret them:
//!
//! - `pixel_size` [px/m] maps in-plane metric positions to pixels. Both axes
//!   are mirrored around the image center: `u = w/2 − pixel_size·y`,
//!   `v = h/2 − pixel_size·x`.
//! - `min_depth`/`max_depth` [m] define the affine map between sample value
//!   and metric depth. Value 0 encodes `max_depth` (far plane), `u16::MAX`
//!   encodes `min_depth` (near plane). `value_from_depth` rounds to the
//!   nearest step and clamps out-of-range depths to the nearest encodable
//!   value; it never wraps or errors.
//! - `pose` optionally places the image's local frame in a reference frame;
//!   `None` means the local frame *is* the reference frame.
//!
//! Quantization is lossless in the value direction (`value_from_depth ∘
//! depth_from_value` is the identity on `0..=u16::MAX`) and lossy by at most
//! one step in the depth direction.
//!
//! Any synthetic buffer compared against a captured image must share this
//! exact metadata; see [`crate::render::OrthographicProjection`].
use crate::image::DepthU16;
use nalgebra::{Isometry3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Largest encodable sample value (near plane).
pub const VALUE_MAX: f64 = u16::MAX as f64;

/// Quantized top-down depth image with projection metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrthographicImage {
    /// Depth samples; `Clone` deep-copies the buffer.
    pub data: DepthU16,
    /// Pixel density [px/m].
    pub pixel_size: f64,
    /// Depth encoded by the largest sample value [m].
    pub min_depth: f64,
    /// Depth encoded by sample value 0 [m].
    pub max_depth: f64,
    /// Identifier of the capturing camera, if known.
    pub camera: Option<String>,
    /// Image local frame → reference frame; `None` means identity.
    pub pose: Option<Isometry3<f64>>,
}

impl OrthographicImage {
    pub fn new(data: DepthU16, pixel_size: f64, min_depth: f64, max_depth: f64) -> Self {
        Self {
            data,
            pixel_size,
            min_depth,
            max_depth,
            camera: None,
            pose: None,
        }
    }

    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    pub fn with_pose(mut self, pose: Isometry3<f64>) -> Self {
        self.pose = Some(pose);
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.h
    }

    /// Transform from the image's local frame to the reference frame.
    #[inline]
    pub fn reference_from_local(&self) -> Isometry3<f64> {
        self.pose.unwrap_or_else(Isometry3::identity)
    }

    /// Metric depth encoded by a (possibly fractional) sample value.
    #[inline]
    pub fn depth_from_value(&self, value: f64) -> f64 {
        self.max_depth + (value / VALUE_MAX) * (self.min_depth - self.max_depth)
    }

    /// Sample value encoding `depth`, rounded to the nearest step and clamped
    /// to the encodable range.
    #[inline]
    pub fn value_from_depth(&self, depth: f64) -> u16 {
        let value =
            ((depth - self.max_depth) / (self.min_depth - self.max_depth) * VALUE_MAX).round();
        value.clamp(0.0, VALUE_MAX) as u16
    }

    /// Metric depth stored at pixel (x, y).
    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f64 {
        self.depth_from_value(self.data.get(x, y) as f64)
    }

    /// Project an in-plane point (image local frame) to the nearest pixel
    /// `(u, v)`, where `u` indexes columns and `v` rows. The result may lie
    /// outside the canvas; bounds checking is the caller's responsibility.
    pub fn project(&self, point: &Point3<f64>) -> (i32, i32) {
        let u = self.width() as f64 / 2.0 - self.pixel_size * point.y;
        let v = self.height() as f64 / 2.0 - self.pixel_size * point.x;
        (u.round() as i32, v.round() as i32)
    }

    /// Approximate inverse of [`project`](Self::project): recover the
    /// in-plane position of a pixel `(u, v)`.
    ///
    /// The third coordinate is always 0.0; it is *not* derived from the
    /// stored depth sample at that pixel. Callers needing the surface height
    /// must look up [`depth_at`](Self::depth_at) themselves.
    pub fn inverse_project(&self, pixel: (f64, f64)) -> Point3<f64> {
        let x = (self.height() as f64 / 2.0 - pixel.1) / self.pixel_size;
        let y = (self.width() as f64 / 2.0 - pixel.0) / self.pixel_size;
        Point3::new(x, y, 0.0)
    }

    /// Metric position of pixel index `index` along one axis of `length`
    /// pixels, centered at `length / 2`.
    #[inline]
    pub fn position_from_index(&self, index: i32, length: usize) -> f64 {
        ((index as f64 + 0.5) - length as f64 / 2.0) / self.pixel_size
    }

    /// Pixel index of metric `position` along one axis of `length` pixels.
    /// Mutual inverse of [`position_from_index`](Self::position_from_index);
    /// the result may lie outside `[0, length)`.
    #[inline]
    pub fn index_from_position(&self, position: f64, length: usize) -> i32 {
        (position * self.pixel_size + length as f64 / 2.0 - 0.5).round() as i32
    }

    /// Return a new image with the scene shifted by a metric `offset`.
    ///
    /// `offset.x`/`offset.y` shift the content in-plane following the same
    /// axis mapping as [`project`](Self::project); `offset.z` moves the scene
    /// toward the camera for positive values, with saturating clamp at the
    /// depth window. Pixels vacated by the shift read 0 (far plane).
    pub fn translate(&self, offset: &Vector3<f64>) -> OrthographicImage {
        let (w, h) = (self.width(), self.height());
        let mut out = OrthographicImage {
            data: DepthU16::new(w, h),
            pixel_size: self.pixel_size,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            camera: self.camera.clone(),
            pose: self.pose,
        };

        let value_shift =
            (offset.z * VALUE_MAX / (self.max_depth - self.min_depth)).round() as i64;
        let du = (self.pixel_size * offset.y).round() as i64;
        let dv = (self.pixel_size * offset.x).round() as i64;

        for v in 0..h {
            let sv = v as i64 + dv;
            for u in 0..w {
                let su = u as i64 + du;
                if su < 0 || sv < 0 || su >= w as i64 || sv >= h as i64 {
                    continue;
                }
                let shifted = self.data.get(su as usize, sv as usize) as i64 + value_shift;
                out.data
                    .set(u, v, shifted.clamp(0, VALUE_MAX as i64) as u16);
            }
        }
        out
    }
}
