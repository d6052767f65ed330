//! JSON runtime configuration for the demo tooling.
use crate::container::BoxData;
use crate::gripper::{BoxDims, Gripper};
use crate::render::OrthographicProjection;
use crate::types::RobotPose;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct ContainerConfig {
    pub center: [f64; 3],
    pub size: [f64; 3],
}

#[derive(Clone, Debug, Deserialize)]
pub struct GripperConfig {
    pub min_stroke: f64,
    pub max_stroke: f64,
    /// Finger box as [width, extent, height].
    pub finger: [f64; 3],
    /// Optional body box as [width, extent, height].
    #[serde(default)]
    pub body: Option<[f64; 3]>,
}

/// One candidate pose; angles follow the z-y-x Euler convention of
/// [`RobotPose::from_euler`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub projection: OrthographicProjection,
    /// Margin added by the canvas sizing [px].
    #[serde(default = "default_canvas_offset")]
    pub canvas_offset: usize,
    pub container: ContainerConfig,
    pub gripper: GripperConfig,
    pub candidates: Vec<CandidateConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_canvas_offset() -> usize {
    16
}

impl RuntimeConfig {
    pub fn box_data(&self) -> BoxData {
        BoxData::from_center_size(self.container.center, self.container.size)
    }

    pub fn gripper(&self) -> Gripper {
        let f = self.gripper.finger;
        let mut gripper = Gripper::new(
            self.gripper.min_stroke,
            self.gripper.max_stroke,
            BoxDims::new(f[0], f[1], f[2]),
        );
        if let Some(b) = self.gripper.body {
            gripper = gripper.with_body(BoxDims::new(b[0], b[1], b[2]));
        }
        gripper
    }

    pub fn poses(&self) -> Vec<RobotPose> {
        self.candidates
            .iter()
            .map(|c| RobotPose::from_euler(c.x, c.y, c.z, c.a, c.b, c.c, c.d))
            .collect()
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let json = r#"{
            "projection": { "pixel_size": 2000.0, "min_depth": 0.19, "max_depth": 0.41 },
            "container": { "center": [-0.002, -0.0065, 0.0], "size": [0.174, 0.282, 0.1] },
            "gripper": { "min_stroke": 0.0, "max_stroke": 0.086, "finger": [0.024, 0.008, 0.12] },
            "candidates": [ { "x": 0.04, "y": -0.01, "z": 0.34, "d": 0.05 } ]
        }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.canvas_offset, 16);
        assert!(config.output.json_out.is_none());

        let gripper = config.gripper();
        assert!(gripper.admits(0.05));
        assert!(gripper.body.is_none());

        let poses = config.poses();
        assert_eq!(poses.len(), 1);
        assert!((poses[0].d - 0.05).abs() < 1e-12);
        assert!(config.box_data().is_pose_inside(&poses[0]));
    }
}
