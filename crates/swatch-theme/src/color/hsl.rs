//! HSL representation
//!
//! The classifier, quality filter and contrast normalizer all reason in
//! hue/saturation/lightness. [`Hsl`] is a pure function of an [`Rgb`] sample
//! and is never stored as pipeline state.

use super::rgb::Rgb;

/// A color in HSL (hue, saturation, lightness).
///
/// # Components
///
/// - `h`: Hue in degrees, 0.0..360.0
/// - `s`: Saturation, 0.0..=1.0
/// - `l`: Lightness, 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees (0.0..360.0)
    pub h: f32,
    /// Saturation (0.0..=1.0)
    pub s: f32,
    /// Lightness (0.0..=1.0)
    pub l: f32,
}

impl Hsl {
    /// Create a new HSL color. Values are stored as given.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_theme::{Hsl, Rgb};
    ///
    /// let red = Hsl::new(0.0, 1.0, 0.5);
    /// assert_eq!(Rgb::from(red), Rgb::new(255, 0, 0));
    /// ```
    #[inline]
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Return a copy with saturation and lightness clamped to 0.0..=1.0
    /// and hue wrapped into 0.0..360.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            h: self.h.rem_euclid(360.0),
            s: self.s.clamp(0.0, 1.0),
            l: self.l.clamp(0.0, 1.0),
        }
    }

    /// True when every component is a finite number.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.h.is_finite() && self.s.is_finite() && self.l.is_finite()
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if rgb.r == rgb.g && rgb.g == rgb.b {
            return Self { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self {
            h: (h * 60.0).rem_euclid(360.0),
            s,
            l,
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let Hsl { h, s, l } = hsl.clamped();

        if s == 0.0 {
            return Rgb::from_unit(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h / 360.0;

        Rgb::from_unit(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
