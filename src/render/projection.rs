//! Orthographic projection parameters shared by capture and synthesis.
use crate::ortho::OrthographicImage;
use crate::render::rasterizer::RenderError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// The projection triple any two comparable depth buffers must share.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrthographicProjection {
    /// Pixel density [px/m].
    pub pixel_size: f64,
    /// Near plane [m].
    pub min_depth: f64,
    /// Far plane [m].
    pub max_depth: f64,
}

impl OrthographicProjection {
    pub fn new(pixel_size: f64, min_depth: f64, max_depth: f64) -> Self {
        Self {
            pixel_size,
            min_depth,
            max_depth,
        }
    }

    /// The projection a captured image was taken under.
    pub fn from_image(image: &OrthographicImage) -> Self {
        Self {
            pixel_size: image.pixel_size,
            min_depth: image.min_depth,
            max_depth: image.max_depth,
        }
    }

    /// Require exact agreement with an image's stored metadata. Any
    /// disagreement is a configuration error, never resampled away.
    pub fn matches_image(&self, image: &OrthographicImage) -> Result<(), RenderError> {
        let fields = [
            ("pixel_size", self.pixel_size, image.pixel_size),
            ("min_depth", self.min_depth, image.min_depth),
            ("max_depth", self.max_depth, image.max_depth),
        ];
        for (field, expected, actual) in fields {
            if expected != actual {
                return Err(RenderError::ProjectionMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Per-pixel fragment resolution when quads overlap.
///
/// `KeepFarthest` retains the surface deepest into the scene, the one the
/// collision comparison needs, since the gripper extends from its deepest
/// surface back toward the camera. `KeepNearest` is the ordinary camera view
/// used when synthesizing images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthTest {
    KeepNearest,
    KeepFarthest,
}

/// Full configuration handed to [`Rasterizer::configure`].
///
/// [`Rasterizer::configure`]: crate::render::Rasterizer::configure
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Canvas `[width, height]` in pixels.
    pub canvas: [usize; 2],
    pub projection: OrthographicProjection,
    /// Camera position in the render frame; the camera looks along +z with
    /// the same center-mirrored pixel mapping as
    /// [`OrthographicImage::project`](crate::ortho::OrthographicImage::project).
    pub camera_position: Vector3<f64>,
    pub depth_test: DepthTest,
}
