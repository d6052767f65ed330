//! Canvas sizing for contour renders.
use crate::container::BoxData;

/// Pixel canvas `[height, width]` sufficient to render `box_data` at
/// `pixel_size` with an `offset` margin, with the contour origin at the
/// canvas center. Use it to size buffers before capture or synthesis;
/// delegates to [`BoxData::get_rect`].
pub fn render_target_size(box_data: &BoxData, pixel_size: f64, offset: usize) -> [usize; 2] {
    box_data.get_rect(pixel_size, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_contour_rect() {
        let b = BoxData::from_center_size([0.0, 0.0, 0.0], [0.2, 0.3, 0.1]);
        assert_eq!(render_target_size(&b, 100.0, 16), b.get_rect(100.0, 16));
        assert_eq!(render_target_size(&b, 100.0, 0), [20, 30]);
    }
}
