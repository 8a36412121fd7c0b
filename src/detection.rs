use image::{imageops::FilterType, GrayImage, Luma, RgbImage};
use imageproc::{
    edges::canny,
    morphology::{grayscale_dilate, Mask},
};
use log::debug;

use crate::params::EdgeParams;

/// Runs Canny on the grayscale version of `image`.
///
/// The returned mask has the same dimensions as `image` and holds 255 on edge
/// pixels, 0 everywhere else.
pub fn detect_edges(image: &RgbImage, params: &EdgeParams) -> GrayImage {
    let gray = image::imageops::grayscale(image);
    let (low, high) = params.thresholds();
    let edges = canny(&gray, low, high);
    debug!(
        "detect_edges {}x{} low={} high={} edge_pixels={}",
        image.width(),
        image.height(),
        low,
        high,
        count_set(&edges)
    );
    edges
}

/// Dilates `mask` with a filled square structuring element of side `side`.
///
/// The anchor sits at `side / 2`, so a side of 1 leaves the mask untouched.
pub fn dilate_square(mask: &GrayImage, side: u32) -> GrayImage {
    if side <= 1 {
        return mask.clone();
    }
    let side = side.min(255);
    let kernel = GrayImage::from_pixel(side, side, Luma([255]));
    let anchor = (side / 2) as u8;
    grayscale_dilate(mask, &Mask::from_image(&kernel, anchor, anchor))
}

/// Resizes to exactly `width` x `height` using bilinear filtering.
pub fn resize_exact(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(image, width.max(1), height.max(1), FilterType::Triangle)
}

pub fn count_set(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dilation_grows_a_single_pixel_into_a_square() {
        let mut mask = GrayImage::new(9, 9);
        mask.put_pixel(4, 4, Luma([255]));

        assert_eq!(count_set(&dilate_square(&mask, 1)), 1);

        let grown = dilate_square(&mask, 3);
        assert_eq!(count_set(&grown), 9);
        for y in 3..=5 {
            for x in 3..=5 {
                assert_eq!(grown.get_pixel(x, y)[0], 255, "({x}, {y}) should be set");
            }
        }
    }

    #[test]
    fn edges_keep_the_input_dimensions() {
        let mut image = RgbImage::from_pixel(40, 30, image::Rgb([10, 10, 10]));
        for y in 0..30 {
            for x in 20..40 {
                image.put_pixel(x, y, image::Rgb([240, 240, 240]));
            }
        }
        let edges = detect_edges(&image, &EdgeParams::default());
        assert_eq!(edges.dimensions(), (40, 30));
        assert!(count_set(&edges) > 0);
    }

    #[test]
    fn resize_hits_the_exact_target() {
        let image = RgbImage::new(64, 48);
        assert_eq!(resize_exact(&image, 17, 93).dimensions(), (17, 93));
        assert_eq!(resize_exact(&image, 0, 0).dimensions(), (1, 1));
    }
}
