//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit color sample, the unit every stage consumes and produces.
//! - [`Hsl`]: derived hue/saturation/lightness view used for classification,
//!   quality checks and contrast normalization.
//!
//! # Example
//!
//! ```
//! use swatch_theme::{Hsl, Rgb};
//!
//! let rgb = Rgb::new(10, 200, 10);
//! let hsl = Hsl::from(rgb);
//! assert!(hsl.s > 0.9);
//!
//! // Back to 8-bit
//! assert_eq!(Rgb::from(hsl), rgb);
//! ```

mod hsl;
mod rgb;

pub use hsl::Hsl;
pub use rgb::Rgb;
