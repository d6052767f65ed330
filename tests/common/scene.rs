//! Synthetic captured scenes for the render/compare tests.
use grasp_checker::image::DepthU16;
use grasp_checker::ortho::OrthographicImage;
use grasp_checker::render::OrthographicProjection;

/// A flat surface at `depth` filling the whole canvas.
pub fn flat_scene(
    canvas: [usize; 2],
    projection: &OrthographicProjection,
    depth: f64,
) -> OrthographicImage {
    let mut image = OrthographicImage::new(
        DepthU16::new(canvas[0], canvas[1]),
        projection.pixel_size,
        projection.min_depth,
        projection.max_depth,
    );
    let value = image.value_from_depth(depth);
    image.data.fill(value);
    image
}

/// A flat floor with one raised axis-aligned block. `block_center` and
/// `block_size` are metric in-plane coordinates; `block_depth` is the depth
/// of the block's top surface (nearer to the camera than `floor_depth`).
pub fn scene_with_block(
    canvas: [usize; 2],
    projection: &OrthographicProjection,
    floor_depth: f64,
    block_depth: f64,
    block_center: [f64; 2],
    block_size: [f64; 2],
) -> OrthographicImage {
    let mut image = flat_scene(canvas, projection, floor_depth);
    let block_value = image.value_from_depth(block_depth);
    for v in 0..canvas[1] {
        for u in 0..canvas[0] {
            let p = image.inverse_project((u as f64, v as f64));
            if (p.x - block_center[0]).abs() <= block_size[0] / 2.0
                && (p.y - block_center[1]).abs() <= block_size[1] / 2.0
            {
                image.data.set(u, v, block_value);
            }
        }
    }
    image
}
