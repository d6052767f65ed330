//! Quad geometry for gripper parts and container aprons.
use crate::container::BoxData;
use crate::gripper::{BoxDims, Gripper};
use crate::render::rasterizer::ColoredQuad;
use nalgebra::{Isometry3, Point3, Translation3};

/// How far the container aprons extend beyond the rim [m].
const APRON_EXTENT: f64 = 1.0;

const FINGER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const BODY_COLOR: [f32; 3] = [0.6, 0.6, 0.6];
const APRON_COLOR: [f32; 3] = [0.8, 0.0, 0.0];

/// The six faces of a cuboid spanning `±width/2 × ±extent/2` in the local
/// x/y plane and `[0, height]` along local z, mapped through `pose`.
pub fn cuboid_quads(pose: &Isometry3<f64>, size: &BoxDims, color: [f32; 3]) -> Vec<ColoredQuad> {
    let (hw, he) = (size.width / 2.0, size.extent / 2.0);
    let corner = |x: f64, y: f64, z: f64| pose * Point3::new(x, y, z);

    // Lower face (z = 0), then upper face (z = height), counter-clockwise
    // seen from below/above respectively.
    let l = [
        corner(-hw, he, 0.0),
        corner(hw, he, 0.0),
        corner(hw, -he, 0.0),
        corner(-hw, -he, 0.0),
    ];
    let u = [
        corner(-hw, he, size.height),
        corner(hw, he, size.height),
        corner(hw, -he, size.height),
        corner(-hw, -he, size.height),
    ];

    vec![
        ColoredQuad::new([l[0], l[1], l[2], l[3]], color),
        ColoredQuad::new([u[0], u[1], u[2], u[3]], color),
        ColoredQuad::new([l[0], l[1], u[1], u[0]], color),
        ColoredQuad::new([l[3], l[2], u[2], u[3]], color),
        ColoredQuad::new([l[0], l[3], u[3], u[0]], color),
        ColoredQuad::new([l[1], l[2], u[2], u[1]], color),
    ]
}

/// Finger boxes at ±`stroke`/2 along the tip pose's lateral (y) axis, plus
/// the body box above the fingers when the gripper defines one.
pub fn gripper_quads(tip_pose: &Isometry3<f64>, stroke: f64, gripper: &Gripper) -> Vec<ColoredQuad> {
    let mut quads = cuboid_quads(
        &(tip_pose * Translation3::new(0.0, stroke / 2.0, 0.0)),
        &gripper.finger,
        FINGER_COLOR,
    );
    quads.extend(cuboid_quads(
        &(tip_pose * Translation3::new(0.0, -stroke / 2.0, 0.0)),
        &gripper.finger,
        FINGER_COLOR,
    ));
    if let Some(body) = &gripper.body {
        quads.extend(cuboid_quads(
            &(tip_pose * Translation3::new(0.0, 0.0, gripper.finger.height)),
            body,
            BODY_COLOR,
        ));
    }
    quads
}

/// Four rim-height aprons extending outward from the contour edges to
/// ±1 m, used to paint the container onto a depth image:
/// everything outside the rim reads as rim-height surface afterwards.
pub fn box_apron_quads(box_data: &BoxData) -> Vec<ColoredQuad> {
    let c = box_data.contour();
    let e = APRON_EXTENT;
    let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);

    vec![
        // Outward from the −y edge (c1–c2).
        ColoredQuad::new(
            [
                p(c[2].x, -e, c[2].z),
                p(c[2].x, c[2].y, c[2].z),
                p(c[1].x, c[1].y, c[1].z),
                p(c[1].x, -e, c[1].z),
            ],
            APRON_COLOR,
        ),
        // Outward from the +y edge (c3–c0).
        ColoredQuad::new(
            [
                p(c[3].x, e, c[3].z),
                p(c[3].x, c[3].y, c[3].z),
                p(c[0].x, c[0].y, c[0].z),
                p(c[0].x, e, c[0].z),
            ],
            APRON_COLOR,
        ),
        // Outward from the +x edge (c0–c1).
        ColoredQuad::new(
            [
                p(e, -e, c[1].z),
                p(c[1].x, -e, c[1].z),
                p(c[0].x, e, c[0].z),
                p(e, e, c[0].z),
            ],
            APRON_COLOR,
        ),
        // Outward from the −x edge (c2–c3).
        ColoredQuad::new(
            [
                p(-e, -e, c[2].z),
                p(c[2].x, -e, c[2].z),
                p(c[3].x, e, c[3].z),
                p(-e, e, c[3].z),
            ],
            APRON_COLOR,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_spans_its_dimensions() {
        let size = BoxDims::new(0.04, 0.008, 0.12);
        let quads = cuboid_quads(&Isometry3::identity(), &size, FINGER_COLOR);
        assert_eq!(quads.len(), 6);

        let corners: Vec<_> = quads.iter().flat_map(|q| q.corners).collect();
        let max_x = corners.iter().map(|c| c.x).fold(f64::MIN, f64::max);
        let min_z = corners.iter().map(|c| c.z).fold(f64::MAX, f64::min);
        let max_z = corners.iter().map(|c| c.z).fold(f64::MIN, f64::max);
        assert!((max_x - 0.02).abs() < 1e-12);
        assert!((min_z - 0.0).abs() < 1e-12);
        assert!((max_z - 0.12).abs() < 1e-12);
    }

    #[test]
    fn fingers_sit_at_half_stroke() {
        let gripper = Gripper::new(0.0, 0.1, BoxDims::new(0.02, 0.008, 0.1));
        let quads = gripper_quads(&Isometry3::identity(), 0.06, &gripper);
        assert_eq!(quads.len(), 12);

        let max_y = quads
            .iter()
            .flat_map(|q| q.corners)
            .map(|c| c.y)
            .fold(f64::MIN, f64::max);
        // Outer face of the +y finger: stroke/2 + extent/2.
        assert!((max_y - 0.034).abs() < 1e-12);

        let with_body = gripper.with_body(BoxDims::new(0.05, 0.05, 0.08));
        assert_eq!(
            gripper_quads(&Isometry3::identity(), 0.06, &with_body).len(),
            18
        );
    }

    #[test]
    fn aprons_stay_at_rim_height() {
        let b = BoxData::from_center_size([0.0, 0.0, 0.0], [0.2, 0.3, 0.05]);
        let quads = box_apron_quads(&b);
        assert_eq!(quads.len(), 4);
        assert!(quads
            .iter()
            .flat_map(|q| q.corners)
            .all(|c| (c.z - 0.05).abs() < 1e-12));
    }
}
