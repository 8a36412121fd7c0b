use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut},
    rect::Rect,
};

use crate::utils::Point;

/// Weight of the source image in the composite view.
pub const SOURCE_WEIGHT: f32 = 0.8;
/// Weight of the colourised edges in the composite view.
pub const EDGE_WEIGHT: f32 = 0.2;

pub const ERASER_OUTLINE: Rgb<u8> = Rgb([255, 0, 0]);
pub const DRAW_OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

/// Clears the square `[x - r, x + r) x [y - r, y + r)` around each point.
///
/// The cleared region is square even though eraser markers are drawn as
/// circles. Parts falling outside the image are ignored.
pub fn erase_squares<'a>(
    mask: &mut GrayImage,
    points: impl IntoIterator<Item = &'a Point>,
    radius: i32,
) {
    let side = (2 * radius).max(1) as u32;
    for point in points {
        let rect = Rect::at(point.x() - radius, point.y() - radius).of_size(side, side);
        draw_filled_rect_mut(mask, rect, Luma([0]));
    }
}

/// Paints a filled circle of `value` at each point.
pub fn stamp_circles<'a>(
    mask: &mut GrayImage,
    points: impl IntoIterator<Item = &'a Point>,
    radius: i32,
    value: u8,
) {
    for point in points {
        draw_filled_circle_mut(mask, (point.x(), point.y()), radius, Luma([value]));
    }
}

/// Turns a binary mask into an RGB image: `color` where set, black elsewhere.
pub fn colorize(mask: &GrayImage, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get_pixel(x, y)[0] != 0 {
            color
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// Blends the colourised edges into the source at edge pixels.
///
/// Pixels outside the mask are copied from `source` untouched.
pub fn blend(source: &RgbImage, colored: &RgbImage, mask: &GrayImage) -> RgbImage {
    let mut out = source.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y)[0] == 0 {
            continue;
        }
        let edge = colored.get_pixel(x, y);
        for c in 0..3 {
            let v = SOURCE_WEIGHT * pixel[c] as f32 + EDGE_WEIGHT * edge[c] as f32;
            pixel[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Draws a two pixel wide circle outline, used for live stroke feedback.
pub fn draw_outline(view: &mut RgbImage, point: Point, radius: i32, color: Rgb<u8>) {
    let center = (point.x(), point.y());
    draw_hollow_circle_mut(view, center, radius, color);
    if radius > 1 {
        draw_hollow_circle_mut(view, center, radius - 1, color);
    }
}
