//! Image preprocessing for palette extraction.
//!
//! Avatars arrive at arbitrary sizes. Before extraction every bitmap is
//! downscaled so its longer side is at most
//! [`PreprocessOptions::max_dimension`] (1024 by default, 256 in
//! [`PreprocessOptions::fast()`] mode). This bounds extraction cost and makes
//! sampling density comparable across images.
//!
//! # Processing
//!
//! 1. **Bound** - compute target size, aspect ratio preserved, sides rounded
//!    to the nearest integer and at least 1
//! 2. **Downscale** - area-average into the target canvas, alpha-weighted
//! 3. **Wrap** - return a [`PixelSource`]; extractors read
//!    [`PixelSource::opaque_colors`]
//!
//! # Example
//!
//! ```
//! use swatch_theme::{Preprocessor, PreprocessOptions};
//!
//! let preprocessor = Preprocessor::new(PreprocessOptions::fast());
//!
//! // 512x128 solid teal
//! let rgba = [0u8, 128, 128, 255].repeat(512 * 128);
//! let source = preprocessor.process(&rgba, 512, 128);
//!
//! assert_eq!(source.width(), 256);
//! assert_eq!(source.height(), 64);
//!
//! // Zero-sized input is "no usable data", not an error
//! let empty = preprocessor.process(&[], 0, 0);
//! assert!(empty.is_degenerate());
//! ```

mod options;
mod preprocessor;
mod resize;

pub use options::{PreprocessOptions, DEFAULT_MAX_DIMENSION, FAST_MAX_DIMENSION};
pub use preprocessor::{PixelSource, Preprocessor};
