//! Image preprocessing applied before OCR
//!
//! grayscale → light Gaussian denoise → adaptive Gaussian threshold.
//! Only the OCR input is preprocessed; redaction always draws on the original.

use crate::config::PreprocessConfig;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Prepare an image for OCR according to `config`
pub fn preprocess(image: &DynamicImage, config: &PreprocessConfig) -> GrayImage {
    let gray = image.to_luma8();
    if !config.enabled {
        return gray;
    }

    let denoised = if config.blur_sigma > 0.0 {
        gaussian_blur_f32(&gray, config.blur_sigma)
    } else {
        gray
    };

    adaptive_threshold_gaussian(
        &denoised,
        config.threshold_block_size,
        config.threshold_offset,
    )
}

/// Binarize against a Gaussian-weighted local mean.
///
/// A pixel becomes white when it is brighter than the mean of its
/// `block_size` neighborhood minus `offset`, black otherwise. This evens out
/// shadows and uneven lighting on phone-captured scans.
pub fn adaptive_threshold_gaussian(image: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let local_mean = gaussian_blur_f32(image, block_sigma(block_size));

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = i32::from(image.get_pixel(x, y)[0]);
        let threshold = i32::from(local_mean.get_pixel(x, y)[0]) - offset;
        if value > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Gaussian sigma equivalent to a square kernel of `block_size` pixels
fn block_sigma(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
