//! Render/compare driver: collision flagging and image synthesis.
//!
//! Collision rule. Both buffers are compared on the normalized value scale
//! (0 = far plane, 1 = near plane). The synthetic buffer keeps the
//! farthest-from-camera gripper fragment per pixel, so a covered pixel
//! whose synthetic value falls below the scene value by more than
//! `depth_tolerance` means the gripper's deepest surface would sit beneath
//! the recorded scene surface there: a collision. A gripper entirely above
//! the scene is collision-free, and the tolerance absorbs quantization
//! noise between capture and synthesis.
use crate::container::BoxData;
use crate::gripper::Gripper;
use crate::image::PixelView;
use crate::ortho::{OrthographicImage, VALUE_MAX};
use crate::render::geometry::{box_apron_quads, gripper_quads};
use crate::render::projection::{DepthTest, OrthographicProjection, RenderConfig};
use crate::render::rasterizer::{ColoredQuad, Rasterizer, RenderError, RenderFrame};
use crate::types::RobotPose;
use log::debug;
use nalgebra::Vector3;

/// Default comparison tolerance: 1% of the full value range.
pub const DEPTH_TOLERANCE: f64 = 0.01;

/// Render/compare collision detector bound to one canvas and projection.
///
/// The canvas and projection must match the captured images it is used
/// with; both are validated per call and mismatches fail immediately.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    /// Canvas `[width, height]` every target image must have.
    pub canvas: [usize; 2],
    /// Projection every target image must have been captured under.
    pub projection: OrthographicProjection,
    /// Camera position handed to the rasterizer.
    pub camera_position: Vector3<f64>,
    /// Collision tolerance on the normalized value scale.
    pub depth_tolerance: f64,
}

impl Renderer {
    pub fn new(canvas: [usize; 2], projection: OrthographicProjection) -> Self {
        Self {
            canvas,
            projection,
            camera_position: Vector3::zeros(),
            depth_tolerance: DEPTH_TOLERANCE,
        }
    }

    fn validate(&self, image: &OrthographicImage) -> Result<(), RenderError> {
        let actual = [image.width(), image.height()];
        if actual != self.canvas {
            return Err(RenderError::CanvasMismatch {
                expected: self.canvas,
                actual,
            });
        }
        self.projection.matches_image(image)
    }

    fn config(&self, depth_test: DepthTest) -> RenderConfig {
        RenderConfig {
            canvas: self.canvas,
            projection: self.projection,
            camera_position: self.camera_position,
            depth_test,
        }
    }

    fn render_checked<R: Rasterizer>(
        &self,
        raster: &mut R,
        quads: &[ColoredQuad],
        depth_test: DepthTest,
    ) -> Result<RenderFrame, RenderError> {
        raster.configure(&self.config(depth_test))?;
        let frame = raster.render(quads)?;
        if frame.depth.w != self.canvas[0] || frame.depth.h != self.canvas[1] {
            return Err(RenderError::Backend(format!(
                "backend returned a {}x{} frame for a {}x{} canvas",
                frame.depth.w, frame.depth.h, self.canvas[0], self.canvas[1]
            )));
        }
        Ok(frame)
    }

    /// Whether a gripper at `pose` with jaw separation `pose.d` would
    /// interfere with the scene recorded in `image`. Returns `true` on
    /// collision.
    pub fn check_gripper_collision<R: Rasterizer>(
        &self,
        raster: &mut R,
        image: &OrthographicImage,
        gripper: &Gripper,
        pose: &RobotPose,
    ) -> Result<bool, RenderError> {
        self.validate(image)?;

        // Synthetic render and captured buffer must share one frame.
        let local = image.reference_from_local().inverse() * pose.pose;
        let quads = gripper_quads(&local, pose.d, gripper);
        let frame = self.render_checked(raster, &quads, DepthTest::KeepFarthest)?;

        let mut violations = 0usize;
        let mut worst = 0.0f64;
        let rows = image
            .data
            .rows()
            .zip(frame.depth.rows())
            .zip(frame.coverage.rows());
        for ((scene, depth), mask) in rows {
            for x in 0..self.canvas[0] {
                if mask[x] == 0 {
                    continue;
                }
                let synthetic = image.value_from_depth(depth[x] as f64) as f64 / VALUE_MAX;
                let recorded = scene[x] as f64 / VALUE_MAX;
                let margin = synthetic - recorded;
                if margin < -self.depth_tolerance {
                    violations += 1;
                    worst = worst.min(margin);
                }
            }
        }

        debug!(
            "collision check: covered={} violations={} worst_margin={:.4}",
            frame.coverage.count(),
            violations,
            worst
        );
        Ok(violations > 0)
    }

    /// Synthesize a copy of `image` with the gripper at `pose` drawn into
    /// the depth channel, for inspection and debugging.
    pub fn draw_gripper_on_image<R: Rasterizer>(
        &self,
        raster: &mut R,
        image: &OrthographicImage,
        gripper: &Gripper,
        pose: &RobotPose,
    ) -> Result<OrthographicImage, RenderError> {
        self.validate(image)?;
        let local = image.reference_from_local().inverse() * pose.pose;
        let quads = gripper_quads(&local, pose.d, gripper);
        let frame = self.render_checked(raster, &quads, DepthTest::KeepNearest)?;
        Ok(self.composite(image, &frame))
    }

    /// Synthesize a copy of `image` with the container aprons drawn into the
    /// depth channel: everything outside the rim reads as rim-height surface.
    pub fn draw_box_on_image<R: Rasterizer>(
        &self,
        raster: &mut R,
        image: &OrthographicImage,
        box_data: &BoxData,
    ) -> Result<OrthographicImage, RenderError> {
        self.validate(image)?;
        let to_local = image.reference_from_local().inverse();
        let quads: Vec<_> = box_apron_quads(box_data)
            .iter()
            .map(|q| q.transformed(&to_local))
            .collect();
        let frame = self.render_checked(raster, &quads, DepthTest::KeepNearest)?;
        Ok(self.composite(image, &frame))
    }

    fn composite(&self, image: &OrthographicImage, frame: &RenderFrame) -> OrthographicImage {
        let mut out = image.clone();
        for y in 0..self.canvas[1] {
            for x in 0..self.canvas[0] {
                if frame.coverage.is_set(x, y) {
                    let value = image.value_from_depth(frame.depth.get(x, y) as f64);
                    out.data.set(x, y, value);
                }
            }
        }
        out
    }
}
