//! Deterministic software rasterizer backing the integration tests.
//!
//! Implements the [`Rasterizer`] capability just well enough for the
//! pipeline: orthographic projection with the same center-mirrored pixel
//! mapping as `OrthographicImage::project`, edge-function triangle fill
//! with interpolated depth, and a per-pixel KeepNearest/KeepFarthest test.
//! Fragment depths clamp to the configured depth window, mirroring the
//! image codec's clamp semantics.
use grasp_checker::image::{DepthF32, MaskU8};
use grasp_checker::render::{
    ColoredQuad, DepthTest, Rasterizer, RenderConfig, RenderError, RenderFrame,
};
use nalgebra::Point3;

#[derive(Default)]
pub struct SoftRaster {
    config: Option<RenderConfig>,
}

impl SoftRaster {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rasterizer for SoftRaster {
    fn configure(&mut self, config: &RenderConfig) -> Result<(), RenderError> {
        self.config = Some(*config);
        Ok(())
    }

    fn render(&mut self, quads: &[ColoredQuad]) -> Result<RenderFrame, RenderError> {
        let config = self
            .config
            .ok_or_else(|| RenderError::Backend("render called before configure".into()))?;
        let [w, h] = config.canvas;
        let mut depth = DepthF32::new(w, h);
        let mut coverage = MaskU8::new(w, h);
        let mut color = vec![[0u16; 4]; w * h];

        for quad in quads {
            let v: Vec<Vertex> = quad
                .corners
                .iter()
                .map(|c| project_vertex(&config, c))
                .collect();
            for tri in [[0usize, 1, 2], [0, 2, 3]] {
                fill_triangle(
                    &config,
                    [&v[tri[0]], &v[tri[1]], &v[tri[2]]],
                    quad.color,
                    &mut depth,
                    &mut coverage,
                    &mut color,
                );
            }
        }

        Ok(RenderFrame {
            depth,
            coverage,
            color: Some(color),
        })
    }
}

struct Vertex {
    u: f64,
    v: f64,
    z: f64,
}

fn project_vertex(config: &RenderConfig, point: &Point3<f64>) -> Vertex {
    let [w, h] = config.canvas;
    let q = point - config.camera_position;
    Vertex {
        u: w as f64 / 2.0 - config.projection.pixel_size * q.y,
        v: h as f64 / 2.0 - config.projection.pixel_size * q.x,
        z: q.z,
    }
}

fn fill_triangle(
    config: &RenderConfig,
    tri: [&Vertex; 3],
    quad_color: [f32; 3],
    depth: &mut DepthF32,
    coverage: &mut MaskU8,
    color: &mut [[u16; 4]],
) {
    let [w, h] = config.canvas;
    let area = edge(tri[0], tri[1], tri[2].u, tri[2].v);
    // Vertical faces project to degenerate triangles; nothing to fill.
    if area.abs() < 1e-9 {
        return;
    }

    let min_u = tri.iter().map(|p| p.u).fold(f64::MAX, f64::min).floor().max(0.0) as usize;
    let max_u = tri.iter().map(|p| p.u).fold(f64::MIN, f64::max).ceil().min((w - 1) as f64) as usize;
    let min_v = tri.iter().map(|p| p.v).fold(f64::MAX, f64::min).floor().max(0.0) as usize;
    let max_v = tri.iter().map(|p| p.v).fold(f64::MIN, f64::max).ceil().min((h - 1) as f64) as usize;

    // Barycentric weights are normalized; a tiny slack keeps shared quad
    // edges inclusive.
    let eps = 1e-9;
    for py in min_v..=max_v {
        for px in min_u..=max_u {
            let (ufl, vfl) = (px as f64, py as f64);
            let w0 = edge(tri[1], tri[2], ufl, vfl) / area;
            let w1 = edge(tri[2], tri[0], ufl, vfl) / area;
            let w2 = edge(tri[0], tri[1], ufl, vfl) / area;
            if w0 < -eps || w1 < -eps || w2 < -eps {
                continue;
            }

            let z = (w0 * tri[0].z + w1 * tri[1].z + w2 * tri[2].z)
                .clamp(config.projection.min_depth, config.projection.max_depth)
                as f32;

            let keep = if !coverage.is_set(px, py) {
                true
            } else {
                match config.depth_test {
                    DepthTest::KeepNearest => z < depth.get(px, py),
                    DepthTest::KeepFarthest => z > depth.get(px, py),
                }
            };
            if keep {
                depth.set(px, py, z);
                coverage.mark(px, py);
                color[py * w + px] = [
                    (quad_color[0].clamp(0.0, 1.0) * u16::MAX as f32) as u16,
                    (quad_color[1].clamp(0.0, 1.0) * u16::MAX as f32) as u16,
                    (quad_color[2].clamp(0.0, 1.0) * u16::MAX as f32) as u16,
                    u16::MAX,
                ];
            }
        }
    }
}

/// Signed doubled area of the triangle (a, b, p).
fn edge(a: &Vertex, b: &Vertex, pu: f64, pv: f64) -> f64 {
    (b.u - a.u) * (pv - a.v) - (b.v - a.v) * (pu - a.u)
}
