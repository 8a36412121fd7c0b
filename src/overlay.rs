use std::path::Path;

use image::{GrayImage, ImageFormat, Rgb, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use log::info;

use crate::{error::EditorError, utils::Point};

/// Builds the exported tracing overlay.
///
/// Every set pixel of `mask` becomes `color` at full opacity, everything else
/// is fully transparent. A filled circle of `radius` is then stamped at each
/// of `points`, opaque as well.
pub fn build_overlay<'a>(
    mask: &GrayImage,
    color: Rgb<u8>,
    points: impl IntoIterator<Item = &'a Point>,
    radius: i32,
) -> RgbaImage {
    let Rgb([r, g, b]) = color;
    let opaque = Rgba([r, g, b, 255]);

    let mut overlay = RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get_pixel(x, y)[0] != 0 {
            opaque
        } else {
            Rgba([0, 0, 0, 0])
        }
    });

    for point in points {
        draw_filled_circle_mut(&mut overlay, (point.x(), point.y()), radius, opaque);
    }
    overlay
}

/// Writes the overlay as a PNG, keeping the alpha channel.
pub fn write_png(overlay: &RgbaImage, path: &Path) -> Result<(), EditorError> {
    overlay
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| EditorError::OverlayWrite {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "saved {}x{} overlay to {}",
        overlay.width(),
        overlay.height(),
        path.display()
    );
    Ok(())
}
