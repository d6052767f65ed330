#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod checker;
pub mod config;
pub mod container;
pub mod gripper;
pub mod image;
pub mod ortho;
pub mod render;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: staged checker + report.
pub use crate::checker::{CheckParams, CheckReport, GraspChecker, StageTimings};

// Core data model.
pub use crate::container::{BoxData, ContourError};
pub use crate::gripper::{BoxDims, Gripper};
pub use crate::ortho::OrthographicImage;
pub use crate::types::RobotPose;

// Render boundary.
pub use crate::render::{
    render_target_size, ColoredQuad, DepthTest, OrthographicProjection, Rasterizer, RenderConfig,
    RenderError, RenderFrame, Renderer,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use grasp_checker::prelude::*;
///
/// let box_data = BoxData::from_center_size([0.0, 0.0, 0.0], [0.2, 0.2, 0.1]);
/// let pose = RobotPose::from_euler(0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.05);
/// println!("inside: {}", box_data.is_pose_inside(&pose));
/// ```
pub mod prelude {
    pub use crate::checker::{CheckReport, GraspChecker};
    pub use crate::container::BoxData;
    pub use crate::gripper::{BoxDims, Gripper};
    pub use crate::image::DepthU16;
    pub use crate::ortho::OrthographicImage;
    pub use crate::render::{OrthographicProjection, Rasterizer, RenderError, Renderer};
    pub use crate::types::RobotPose;
}
