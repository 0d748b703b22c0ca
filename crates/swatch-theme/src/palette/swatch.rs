//! Swatch value type

use crate::color::{Hsl, Rgb};

/// One representative color plus its relative prominence.
///
/// `population` is a relative pixel-count weight. Extractors that do not
/// report one leave it as `None`; [`Swatch::weight`] then treats it as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    /// The swatch color
    pub color: Rgb,
    /// Relative pixel count, if the source reported one
    #[cfg_attr(feature = "serde", serde(default))]
    pub population: Option<u32>,
}

impl Swatch {
    /// Swatch with a known population.
    #[inline]
    pub fn new(color: Rgb, population: u32) -> Self {
        Self {
            color,
            population: Some(population),
        }
    }

    /// Swatch without population metadata.
    #[inline]
    pub fn from_color(color: Rgb) -> Self {
        Self {
            color,
            population: None,
        }
    }

    /// Population as an averaging weight (missing population counts as 1).
    #[inline]
    pub fn weight(&self) -> f64 {
        self.population.map_or(1.0, f64::from)
    }

    /// HSL view of the swatch color.
    #[inline]
    pub fn hsl(&self) -> Hsl {
        Hsl::from(self.color)
    }
}

impl From<Rgb> for Swatch {
    fn from(color: Rgb) -> Self {
        Self::from_color(color)
    }
}
