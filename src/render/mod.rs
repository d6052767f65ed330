//! Render/compare collision detection against a consumed rasterizer.
//!
//! Overview
//! - [`Rasterizer`] is the external capability: orthographic quad rendering
//!   with depth readback. The crate ships no backend; callers supply one
//!   (GPU, software, mock) and own its lifecycle. One instance per execution
//!   context; concurrent use of a single instance is the caller's to
//!   serialize.
//! - [`geometry`] builds the quad soup: finger and body cuboids around a
//!   candidate pose, and the rim-height apron quads of a container contour.
//! - [`Renderer`] drives a configured rasterizer to either flag gripper
//!   collisions against a captured [`OrthographicImage`] or synthesize
//!   images for inspection.
//! - [`sizing`] computes the pixel canvas needed before capture/synthesis.
//!
//! Every operation validates the target image's canvas and projection
//! metadata against its own configuration and fails loudly on mismatch;
//! nothing is ever resampled to fit.
//!
//! [`OrthographicImage`]: crate::ortho::OrthographicImage

pub mod geometry;
pub mod projection;
pub mod rasterizer;
pub mod renderer;
pub mod sizing;

pub use geometry::{box_apron_quads, cuboid_quads, gripper_quads};
pub use projection::{DepthTest, OrthographicProjection, RenderConfig};
pub use rasterizer::{ColoredQuad, Rasterizer, RenderError, RenderFrame};
pub use renderer::Renderer;
pub use sizing::render_target_size;
