//! Container rim model and the cheap containment stage.
//!
//! A [`BoxData`] describes the top rim of a bin as exactly four 3-D corners;
//! corners may sit at different heights. The containment test offsets a
//! candidate pose to its two jaw contact points (plus an approach point for
//! poses with a known height) and requires all of them to fall inside the
//! rim polygon (boundary included) before any rendering is paid for.
use crate::types::RobotPose;
use nalgebra::{Isometry3, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Safety margin added to the commanded jaw separation before the
/// containment test [m].
pub const STROKE_MARGIN: f64 = 0.002;

/// Offset along the pose's local approach axis to the approach point [m].
const APPROACH_OFFSET: f64 = 0.16;

const EDGE_EPS: f64 = 1e-9;

/// Rejected [`BoxData`] construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ContourError {
    #[error("box contour must have exactly 4 corners, got {found}")]
    CornerCount { found: usize },
}

/// Top rim of a container: four ordered corners and an optional center pose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoxData {
    contour: [Point3<f64>; 4],
    /// Optional pose of the container center in the reference frame.
    pub pose: Option<Isometry3<f64>>,
}

impl BoxData {
    /// Build from four corners, ordered (+x+y), (+x−y), (−x−y), (−x+y).
    /// Any other corner count is rejected, never truncated or padded.
    pub fn from_corners(corners: &[[f64; 3]]) -> Result<Self, ContourError> {
        if corners.len() != 4 {
            return Err(ContourError::CornerCount {
                found: corners.len(),
            });
        }
        let mut contour = [Point3::origin(); 4];
        for (dst, src) in contour.iter_mut().zip(corners) {
            *dst = Point3::new(src[0], src[1], src[2]);
        }
        Ok(Self {
            contour,
            pose: None,
        })
    }

    /// Build an axis-aligned rim from a center and a width/length/height box
    /// description; the corner height is `size[2]`.
    pub fn from_center_size(center: [f64; 3], size: [f64; 3]) -> Self {
        let contour = [
            Point3::new(center[0] + size[0] / 2.0, center[1] + size[1] / 2.0, size[2]),
            Point3::new(center[0] + size[0] / 2.0, center[1] - size[1] / 2.0, size[2]),
            Point3::new(center[0] - size[0] / 2.0, center[1] - size[1] / 2.0, size[2]),
            Point3::new(center[0] - size[0] / 2.0, center[1] + size[1] / 2.0, size[2]),
        ];
        Self {
            contour,
            pose: None,
        }
    }

    pub fn with_pose(mut self, pose: Isometry3<f64>) -> Self {
        self.pose = Some(pose);
        self
    }

    /// The four rim corners.
    #[inline]
    pub fn contour(&self) -> &[Point3<f64>; 4] {
        &self.contour
    }

    /// Pixel canvas `[height, width]` needed to render the contour at
    /// `pixel_size` with an `offset` margin.
    ///
    /// The rectangle is center-symmetric (twice the maximum absolute pixel
    /// extent per axis) so the contour origin always maps to the canvas
    /// center, which the render/compare path relies on. Rows span the x
    /// axis and columns the y axis, matching
    /// [`OrthographicImage::project`](crate::ortho::OrthographicImage::project).
    pub fn get_rect(&self, pixel_size: f64, offset: usize) -> [usize; 2] {
        let mut max_x = 0.0f64;
        let mut max_y = 0.0f64;
        for corner in &self.contour {
            max_x = max_x.max((corner.x * pixel_size).abs());
            max_y = max_y.max((corner.y * pixel_size).abs());
        }
        [
            2 * max_x.ceil() as usize + offset,
            2 * max_y.ceil() as usize + offset,
        ]
    }

    /// Whether a candidate pose keeps both jaw contact points, offset by
    /// ±half the commanded separation plus [`STROKE_MARGIN`] along the
    /// pose's local lateral axis, inside the rim polygon.
    ///
    /// For poses with a defined height the approach point (a fixed offset
    /// along the local approach axis, where the gripper body sits above the
    /// grasp) must be inside as well; a NaN height skips that check rather
    /// than failing it, since the height may be filled in by a later stage.
    pub fn is_pose_inside(&self, pose: &RobotPose) -> bool {
        let polygon: [[f64; 2]; 4] = [
            [self.contour[0].x, self.contour[0].y],
            [self.contour[1].x, self.contour[1].y],
            [self.contour[2].x, self.contour[2].y],
            [self.contour[3].x, self.contour[3].y],
        ];

        let half_stroke = 0.5 * (pose.d + STROKE_MARGIN);
        let jaw_a = pose.pose * Point3::new(0.0, half_stroke, 0.0);
        let jaw_b = pose.pose * Point3::new(0.0, -half_stroke, 0.0);

        let mut inside = point_in_polygon(&polygon, [jaw_a.x, jaw_a.y])
            && point_in_polygon(&polygon, [jaw_b.x, jaw_b.y]);

        if inside && !pose.pose.translation.vector.z.is_nan() {
            let approach = pose.pose * Point3::new(0.0, 0.0, APPROACH_OFFSET);
            inside = point_in_polygon(&polygon, [approach.x, approach.y]);
        }
        inside
    }
}

/// Even-odd point-in-polygon test, boundary inclusive.
fn point_in_polygon(polygon: &[[f64; 2]], point: [f64; 2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];

        let cross = (xj - xi) * (point[1] - yi) - (yj - yi) * (point[0] - xi);
        if cross.abs() <= EDGE_EPS
            && point[0] >= xi.min(xj) - EDGE_EPS
            && point[0] <= xi.max(xj) + EDGE_EPS
            && point[1] >= yi.min(yj) - EDGE_EPS
            && point[1] <= yi.max(yj) + EDGE_EPS
        {
            return true;
        }

        if (yi > point[1]) != (yj > point[1]) {
            let x_cross = xi + (point[1] - yi) / (yj - yi) * (xj - xi);
            if point[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_box(side: f64) -> BoxData {
        BoxData::from_center_size([0.0, 0.0, 0.0], [side, side, 0.0])
    }

    #[test]
    fn rejects_wrong_corner_count() {
        let three = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        assert_eq!(
            BoxData::from_corners(&three).unwrap_err(),
            ContourError::CornerCount { found: 3 }
        );

        let four = [
            [1.0, 1.0, 0.0],
            [1.0, -1.0, 0.0],
            [-1.0, -1.0, 0.0],
            [-1.0, 1.0, 0.0],
        ];
        assert!(BoxData::from_corners(&four).is_ok());
    }

    #[test]
    fn center_size_constructor_orders_corners() {
        let b = BoxData::from_center_size([-0.002, -0.0065, 0.0], [0.174, 0.282, 0.1]);
        let c = b.contour();
        assert!((c[0].x - 0.085).abs() < 1e-12 && (c[0].y - 0.1345).abs() < 1e-12);
        assert!((c[2].x + 0.089).abs() < 1e-12 && (c[2].y + 0.1475).abs() < 1e-12);
        assert!(c.iter().all(|p| (p.z - 0.1).abs() < 1e-12));
    }

    #[test]
    fn centered_pose_is_inside_until_jaws_reach_the_rim() {
        let b = square_box(0.2);

        // Jaw contacts at ±0.5·(d + margin) along y.
        let inside = RobotPose::from_euler(0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.05);
        assert!(b.is_pose_inside(&inside));

        // Exactly on the rim counts as inside.
        let on_rim = RobotPose::from_euler(0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.2 - STROKE_MARGIN);
        assert!(b.is_pose_inside(&on_rim));

        // Beyond the rim does not.
        let outside = RobotPose::from_euler(0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.21);
        assert!(!b.is_pose_inside(&outside));
    }

    #[test]
    fn off_center_pose_leaves_the_rim() {
        let b = BoxData::from_center_size([-0.002, -0.0065, 0.0], [0.174, 0.282, 0.0]);
        assert!(b.is_pose_inside(&RobotPose::from_euler(
            0.04, -0.01, 0.34, 0.0, 0.0, 0.0, 0.05
        )));
        assert!(!b.is_pose_inside(&RobotPose::from_euler(
            0.02, -0.18, 0.34, 0.0, 0.0, 0.0, 0.05
        )));
    }

    #[test]
    fn tilted_pose_is_rejected_when_the_approach_point_leaves_the_rim() {
        let b = square_box(0.2);
        // Pitch large enough that the approach point swings past the rim.
        let tilted = RobotPose::from_euler(-0.06, 0.0, 0.3, 0.0, -1.2, 0.0, 0.02);
        assert!(!b.is_pose_inside(&tilted));
        // The same tilt with an undefined height skips the approach check.
        let unknown_z = RobotPose::from_euler(-0.06, 0.0, f64::NAN, 0.0, -1.2, 0.0, 0.02);
        assert!(b.is_pose_inside(&unknown_z));
    }

    #[test]
    fn get_rect_is_center_symmetric_and_monotone_in_offset() {
        let b = BoxData::from_center_size([0.05, 0.0, 0.0], [0.1, 0.2, 0.0]);
        // Max |x| = 0.1, max |y| = 0.1 at 100 px/m.
        assert_eq!(b.get_rect(100.0, 0), [20, 20]);

        let mut last = b.get_rect(100.0, 0);
        for offset in [2usize, 8, 32] {
            let rect = b.get_rect(100.0, offset);
            assert!(rect[0] > last[0] && rect[1] > last[1]);
            last = rect;
        }
    }
}
