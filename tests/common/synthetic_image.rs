use image::{Rgb, RgbImage};

/// A uniform image with no gradients at all.
pub fn solid_rgb(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Dark background with a bright axis-aligned square in the middle.
pub fn bright_square(width: u32, height: u32, side: u32) -> RgbImage {
    assert!(side < width && side < height, "square must fit inside the image");
    let x0 = (width - side) / 2;
    let y0 = (height - side) / 2;
    RgbImage::from_fn(width, height, |x, y| {
        if (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y) {
            Rgb([230, 230, 230])
        } else {
            Rgb([20, 20, 20])
        }
    })
}
