//! Staged admissibility check driving the full pipeline end-to-end.
//!
//! The [`GraspChecker`] exposes a simple API: feed a captured depth image
//! and a candidate pose and get a verdict with per-stage detail. Stages run
//! cheapest-first and short-circuit:
//!
//! 1. Containment: jaw contacts and approach point inside the container rim
//!    (no rendering).
//! 2. Stroke filter: commanded jaw separation inside the gripper's
//!    interval.
//! 3. Collision: render/compare against the captured buffer, only for
//!    candidates that survived the geometry stages.
//!
//! Typical usage:
//! ```no_run
//! use grasp_checker::prelude::*;
//!
//! # fn example<R: Rasterizer>(raster: &mut R, image: OrthographicImage,
//! #            checker: GraspChecker, pose: RobotPose) -> Result<(), RenderError> {
//! let report = checker.check(raster, &image, &pose)?;
//! if report.admissible {
//!     println!("grasp accepted in {:.3} ms", report.timings.total_ms);
//! }
//! # Ok(())
//! # }
//! ```
use crate::container::BoxData;
use crate::gripper::Gripper;
use crate::ortho::OrthographicImage;
use crate::render::{Rasterizer, RenderError, Renderer};
use crate::types::RobotPose;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Switches for the staged check.
#[derive(Clone, Copy, Debug)]
pub struct CheckParams {
    /// Run the render/compare stage for candidates that pass the geometry
    /// stages. When disabled no rasterizer call is made and the report's
    /// `collision_free` stays `None`.
    pub check_collisions: bool,
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            check_collisions: true,
        }
    }
}

/// Wall-clock spent per stage [ms].
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageTimings {
    pub containment_ms: f64,
    pub filter_ms: f64,
    pub collision_ms: f64,
    pub total_ms: f64,
}

/// Verdict plus per-stage detail for one candidate.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CheckReport {
    /// True iff every evaluated stage passed.
    pub admissible: bool,
    pub inside_container: bool,
    pub stroke_admissible: bool,
    /// `None` when the collision stage was skipped (disabled or
    /// short-circuited by an earlier rejection).
    pub collision_free: Option<bool>,
    pub timings: StageTimings,
}

/// Staged admissibility checker for one container/gripper/canvas setup.
#[derive(Clone, Debug)]
pub struct GraspChecker {
    pub box_data: BoxData,
    pub gripper: Gripper,
    pub renderer: Renderer,
    pub params: CheckParams,
}

impl GraspChecker {
    pub fn new(box_data: BoxData, gripper: Gripper, renderer: Renderer) -> Self {
        Self {
            box_data,
            gripper,
            renderer,
            params: CheckParams::default(),
        }
    }

    pub fn with_params(mut self, params: CheckParams) -> Self {
        self.params = params;
        self
    }

    /// Run the staged check for one candidate pose against one captured
    /// image. Rendering errors propagate; geometric rejections are reported,
    /// not errors.
    pub fn check<R: Rasterizer>(
        &self,
        raster: &mut R,
        image: &OrthographicImage,
        pose: &RobotPose,
    ) -> Result<CheckReport, RenderError> {
        let t0 = Instant::now();

        let t = Instant::now();
        let inside_container = self.box_data.is_pose_inside(pose);
        let containment_ms = t.elapsed().as_secs_f64() * 1000.0;
        let t_vec = &pose.pose.translation.vector;
        debug!(
            "containment: pose=({:.3}, {:.3}) d={:.3} inside={}",
            t_vec.x, t_vec.y, pose.d, inside_container
        );

        let t = Instant::now();
        let stroke_admissible = self.gripper.admits(pose.d);
        let filter_ms = t.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "stroke filter: d={:.3} interval=[{:.3}, {:.3}] admissible={}",
            pose.d, self.gripper.min_stroke, self.gripper.max_stroke, stroke_admissible
        );

        let mut collision_ms = 0.0;
        let collision_free = if inside_container && stroke_admissible && self.params.check_collisions
        {
            let t = Instant::now();
            let collides =
                self.renderer
                    .check_gripper_collision(raster, image, &self.gripper, pose)?;
            collision_ms = t.elapsed().as_secs_f64() * 1000.0;
            debug!("collision stage: collides={}", collides);
            Some(!collides)
        } else {
            None
        };

        Ok(CheckReport {
            admissible: inside_container && stroke_admissible && collision_free.unwrap_or(true),
            inside_container,
            stroke_admissible,
            collision_free,
            timings: StageTimings {
                containment_ms,
                filter_ms,
                collision_ms,
                total_ms: t0.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }
}
