use async_trait::async_trait;
use image::ImageReader;
use std::io::Cursor;
use std::sync::Arc;

use crate::error::LoadError;
use crate::models::ImageSource;

/// A decoded RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Trait for turning an image source into pixels
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Read and decode the image
    async fn load(&self, source: &ImageSource) -> Result<DecodedImage, LoadError>;
}

/// Loads files from disk and decodes them with the `image` crate.
pub struct FsImageLoader {
    max_pixels: u64,
}

impl FsImageLoader {
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }
}

impl Default for FsImageLoader {
    fn default() -> Self {
        Self::new(64 * 1024 * 1024)
    }
}

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<DecodedImage, LoadError> {
        let bytes: Arc<[u8]> = match source {
            ImageSource::Path(path) => tokio::fs::read(path).await?.into(),
            ImageSource::Bytes { bytes, .. } => bytes.clone(),
        };

        // Decoding is CPU-bound
        let max_pixels = self.max_pixels;
        tokio::task::spawn_blocking(move || decode(&bytes, max_pixels))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?
    }
}

/// Decode encoded image bytes to RGBA8, refusing oversized images up front.
pub fn decode(bytes: &[u8], max_pixels: u64) -> Result<DecodedImage, LoadError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    if u64::from(width) * u64::from(height) > max_pixels {
        return Err(LoadError::TooLarge {
            width,
            height,
            max: max_pixels,
        });
    }

    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?
        .into_rgba8();

    Ok(DecodedImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}
