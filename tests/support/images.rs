use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};

/// Solid-colour image used wherever a real picture is not needed.
pub fn solid_image(width: u32, height: u32, shade: u8) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([shade, shade, shade, 255]),
    ))
}

pub fn write_test_png(path: &Path, width: u32, height: u32) {
    solid_image(width, height, 128)
        .save(path)
        .expect("write test png");
}
