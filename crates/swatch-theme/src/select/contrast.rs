//! Contrast normalization.
//!
//! Remaps a candidate's saturation and lightness into a readable band, then
//! applies user boosts. Hue is never changed.
//!
//! # Baseline remap
//!
//! Each axis has a `(floor, pivot)` pair. A value below the floor is raised
//! to the floor; values at or above the floor (and therefore everything at
//! or above the pivot) are left alone. The remap is monotonic, never lowers
//! a value, and maps every output to itself, so a second pass is a no-op.
//!
//! Writing the result back to 8-bit can land a hair under a floor, so the
//! target is nudged up until the 8-bit color clears it. Re-normalizing a
//! normalized color therefore returns it unchanged.
//!
//! # Boosts
//!
//! After the baseline, `saturation * saturation_step` and
//! `lightness * lightness_step` are added and clamped to 0.0..=1.0.

use crate::color::{Hsl, Rgb};

const MAX_SETTLE_PASSES: usize = 8;
const SETTLE_STEP: f32 = 1.0 / 255.0;

/// User-tunable saturation/lightness boosts, each 0..=10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Boosts {
    /// Saturation boost units
    pub saturation: u8,
    /// Lightness boost units
    pub lightness: u8,
}

impl Boosts {
    /// Largest accepted boost value.
    pub const MAX: u8 = 10;

    /// Boosts clamped to `0..=MAX`.
    pub fn new(saturation: u8, lightness: u8) -> Self {
        Self {
            saturation: saturation.min(Self::MAX),
            lightness: lightness.min(Self::MAX),
        }
    }

    /// True when both boosts are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.saturation == 0 && self.lightness == 0
    }
}

/// Floor/pivot pair for one axis of the baseline remap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Remap {
    /// Minimum value after the remap (0.0..=1.0)
    pub floor: f32,
    /// Values at or above the pivot are never touched; must be >= `floor`
    pub pivot: f32,
}

impl Remap {
    /// Create a remap.
    pub const fn new(floor: f32, pivot: f32) -> Self {
        Self { floor, pivot }
    }

    /// Remap one value.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_theme::Remap;
    ///
    /// let remap = Remap::new(0.40, 0.50);
    /// assert_eq!(remap.apply(0.0), 0.40);
    /// assert_eq!(remap.apply(0.45), 0.45); // already in the band
    /// assert_eq!(remap.apply(0.90), 0.90); // above the pivot
    /// ```
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        value.max(self.floor)
    }

    fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.floor)
            && (0.0..=1.0).contains(&self.pivot)
            && self.floor <= self.pivot
    }
}

/// Tuning for [`ContrastNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizerOptions {
    /// Saturation floor/pivot
    pub saturation: Remap,
    /// Lightness floor/pivot
    pub lightness: Remap,
    /// Saturation added per boost unit
    pub saturation_step: f32,
    /// Lightness added per boost unit
    pub lightness_step: f32,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            saturation: Remap::new(0.30, 0.70),
            lightness: Remap::new(0.55, 0.75),
            saturation_step: 0.04,
            lightness_step: 0.01,
        }
    }
}

impl NormalizerOptions {
    /// True when both remaps are well-formed and steps are non-negative.
    pub fn is_valid(&self) -> bool {
        self.saturation.is_valid()
            && self.lightness.is_valid()
            && self.saturation_step >= 0.0
            && self.lightness_step >= 0.0
    }
}

/// Enforces a minimum readable saturation/lightness band.
///
/// # Example
///
/// ```
/// use swatch_theme::{Boosts, ContrastNormalizer, Hsl, Rgb};
///
/// let normalizer = ContrastNormalizer::default();
///
/// // Dark navy is lifted into the readable band
/// let lifted = normalizer.normalize(Rgb::new(10, 20, 60), Boosts::default());
/// assert!(Hsl::from(lifted).l >= 0.5);
///
/// // Normalizing twice changes nothing
/// assert_eq!(normalizer.normalize(lifted, Boosts::default()), lifted);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContrastNormalizer {
    options: NormalizerOptions,
}

impl ContrastNormalizer {
    /// Normalizer with custom tuning.
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    /// The tuning in use.
    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Baseline remap followed by user boosts.
    pub fn normalize(&self, rgb: Rgb, boosts: Boosts) -> Rgb {
        let base = self.baseline(rgb);
        if boosts.is_zero() {
            return base;
        }
        self.boost(base, boosts)
    }

    /// Baseline remap only, settled on an 8-bit fixed point.
    pub fn baseline(&self, rgb: Rgb) -> Rgb {
        let hsl = Hsl::from(rgb);
        let floors = (self.options.saturation.floor, self.options.lightness.floor);

        // Achromatic samples have no hue to intensify
        let mut s = if hsl.s > 0.0 {
            self.options.saturation.apply(hsl.s)
        } else {
            hsl.s
        };
        let mut l = self.options.lightness.apply(hsl.l);

        if s == hsl.s && l == hsl.l {
            return rgb;
        }

        let mut out = rgb;
        for _ in 0..MAX_SETTLE_PASSES {
            out = Rgb::from(Hsl::new(hsl.h, s.min(1.0), l.min(1.0)));

            // Rounding to 8 bits may land just under a floor
            let got = Hsl::from(out);
            let s_short = got.s > 0.0 && got.s < floors.0;
            let l_short = got.l < floors.1;
            if !s_short && !l_short {
                break;
            }
            if s_short {
                s += SETTLE_STEP;
            }
            if l_short {
                l += SETTLE_STEP;
            }
        }
        out
    }

    fn boost(&self, rgb: Rgb, boosts: Boosts) -> Rgb {
        let boosts = Boosts::new(boosts.saturation, boosts.lightness);
        let hsl = Hsl::from(rgb);

        let s = if hsl.s > 0.0 {
            hsl.s + boosts.saturation as f32 * self.options.saturation_step
        } else {
            hsl.s
        };
        let l = hsl.l + boosts.lightness as f32 * self.options.lightness_step;

        Rgb::from(Hsl::new(hsl.h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)))
    }
}
