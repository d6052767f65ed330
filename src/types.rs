use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A gripper tip pose extended with the commanded jaw separation `d` [m].
///
/// `d` is not part of the rigid-transform algebra: composing a `RobotPose`
/// with an [`Isometry3`] (in either order) routes through the isometry
/// composition and carries `d` along unchanged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RobotPose {
    /// Rigid transform of the gripper tip.
    pub pose: Isometry3<f64>,
    /// Commanded jaw separation [m].
    pub d: f64,
}

impl RobotPose {
    pub fn new(pose: Isometry3<f64>, d: f64) -> Self {
        Self { pose, d }
    }

    /// Construct from a translation and intrinsic z-y-x Euler angles, where
    /// `a` rotates about z (yaw), `b` about y (pitch) and `c` about x (roll).
    pub fn from_euler(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        let pose = Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(c, b, a),
        );
        Self { pose, d }
    }
}

impl Mul<Isometry3<f64>> for RobotPose {
    type Output = RobotPose;

    fn mul(self, rhs: Isometry3<f64>) -> RobotPose {
        RobotPose {
            pose: self.pose * rhs,
            d: self.d,
        }
    }
}

impl Mul<RobotPose> for Isometry3<f64> {
    type Output = RobotPose;

    fn mul(self, rhs: RobotPose) -> RobotPose {
        RobotPose {
            pose: self * rhs.pose,
            d: rhs.d,
        }
    }
}
