//! Test fixtures: small encoded images.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const RED: [u8; 4] = [200, 30, 30, 255];
pub const GREEN: [u8; 4] = [10, 200, 10, 255];
pub const BLUE: [u8; 4] = [30, 30, 200, 255];
pub const GRAY: [u8; 4] = [120, 120, 120, 255];
pub const TRANSPARENT: [u8; 4] = [255, 0, 255, 0];

fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), format)
        .expect("Failed to encode fixture");
    out
}

/// Solid-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode(
        &RgbaImage::from_pixel(width, height, Rgba(color)),
        ImageFormat::Png,
    )
}

/// PNG with the top half in `top` and the bottom half in `bottom`
pub fn split_png(width: u32, height: u32, top: [u8; 4], bottom: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            Rgba(top)
        } else {
            Rgba(bottom)
        }
    });
    encode(&image, ImageFormat::Png)
}

/// Write a solid PNG into `dir` and return its path
pub fn write_solid_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, solid_png(16, 16, color)).expect("Failed to write fixture");
    path
}
