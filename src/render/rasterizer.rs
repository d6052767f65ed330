//! The consumed rasterization capability.
use crate::image::{DepthF32, MaskU8};
use crate::render::projection::RenderConfig;
use nalgebra::{Isometry3, Point3};
use thiserror::Error;

/// A single quad in the camera's local orthographic frame (x/y in-plane,
/// z depth along the view axis), with a flat color.
#[derive(Clone, Copy, Debug)]
pub struct ColoredQuad {
    pub corners: [Point3<f64>; 4],
    pub color: [f32; 3],
}

impl ColoredQuad {
    pub fn new(corners: [Point3<f64>; 4], color: [f32; 3]) -> Self {
        Self { corners, color }
    }

    /// The quad with every corner mapped through `iso`.
    pub fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self {
            corners: self.corners.map(|c| iso * c),
            color: self.color,
        }
    }
}

/// Buffers read back from one render call.
///
/// `depth` holds metric depths and is only meaningful where `coverage` is
/// set; uncovered pixels are undefined and excluded from any comparison.
/// Fragments outside the configured depth window clamp to it, mirroring the
/// image codec's clamp semantics.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    pub depth: DepthF32,
    pub coverage: MaskU8,
    /// RGBA16 color buffer in row-major order, when the backend produces one.
    pub color: Option<Vec<[u16; 4]>>,
}

/// Errors at the render boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The target image's canvas does not match the configured canvas.
    #[error("canvas size mismatch: configured {expected:?}, image is {actual:?}")]
    CanvasMismatch {
        expected: [usize; 2],
        actual: [usize; 2],
    },
    /// The target image's stored projection disagrees with the configured
    /// one.
    #[error("projection mismatch on {field}: configured {expected}, image stores {actual}")]
    ProjectionMismatch {
        field: &'static str,
        expected: f64,
        actual: f64,
    },
    /// The backend failed; fatal for the current worker, not retried here.
    #[error("rasterizer backend failure: {0}")]
    Backend(String),
}

/// External orthographic quad rasterizer with depth readback.
///
/// A stateful resource bound to the execution context that created it: issue
/// all calls against one instance from that context and serialize any
/// sharing. Backend failures propagate as [`RenderError::Backend`]; a broken
/// context is not retried.
pub trait Rasterizer {
    /// Bind canvas size, projection, camera placement and depth test for
    /// subsequent [`render`](Self::render) calls.
    fn configure(&mut self, config: &RenderConfig) -> Result<(), RenderError>;

    /// Rasterize `quads` under the configured projection and read back the
    /// per-pixel surface depth selected by the configured
    /// [`DepthTest`](crate::render::DepthTest), plus the coverage mask and
    /// color buffer.
    fn render(&mut self, quads: &[ColoredQuad]) -> Result<RenderFrame, RenderError>;
}
