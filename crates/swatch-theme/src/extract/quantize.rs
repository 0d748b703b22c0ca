//! K-means color quantization shared by the built-in extractors.
//!
//! Samples are taken from [`PixelSource::opaque_colors`] with a fixed stride,
//! clustered in CIE Lab with `kmeans_colors`, and returned as
//! population-counted clusters. The seed is fixed, so the same pixels always
//! give the same clusters.

use std::collections::HashMap;

use kmeans_colors::get_kmeans;
use ::palette::{IntoColor, Lab, Srgb};

use crate::api::ExtractError;
use crate::color::Rgb;
use crate::preprocess::PixelSource;

const CONVERGENCE: f32 = 1e-4;

/// `kmeans_colors` reports cluster membership as `u8`.
const MAX_CLUSTERS: usize = 256;

/// One quantized color and how many samples it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Centroid color
    pub color: Rgb,
    /// Number of samples assigned to this centroid
    pub population: u32,
}

/// K-means quantizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    /// Upper bound on the number of clusters (1..=256)
    pub max_colors: usize,
    /// Use every n-th opaque pixel
    pub sample_stride: usize,
    /// K-means iteration cap
    pub max_iterations: usize,
    /// Seed for centroid initialization
    pub seed: u64,
}

impl Quantizer {
    /// Quantizer with the given cluster bound and sampling stride.
    pub fn new(max_colors: usize, sample_stride: usize) -> Self {
        Self {
            max_colors,
            sample_stride,
            max_iterations: 20,
            seed: 0,
        }
    }

    /// Cluster the source, largest population first.
    ///
    /// Images with no more distinct sampled colors than `max_colors` skip
    /// k-means and return each distinct color with its exact count.
    pub fn quantize(&self, source: &PixelSource) -> Result<Vec<Cluster>, ExtractError> {
        if self.max_colors == 0 || self.max_colors > MAX_CLUSTERS {
            return Err(ExtractError::invalid(
                "max_colors",
                format!("{} is outside 1..={}", self.max_colors, MAX_CLUSTERS),
            ));
        }

        let samples: Vec<Rgb> = source
            .opaque_colors()
            .step_by(self.sample_stride.max(1))
            .collect();
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let mut distinct: HashMap<Rgb, u32> = HashMap::new();
        for &color in &samples {
            *distinct.entry(color).or_insert(0) += 1;
        }

        let clusters = if distinct.len() <= self.max_colors {
            distinct
                .into_iter()
                .map(|(color, population)| Cluster { color, population })
                .collect()
        } else {
            self.kmeans(&samples)
        };

        Ok(sort_clusters(clusters))
    }

    fn kmeans(&self, samples: &[Rgb]) -> Vec<Cluster> {
        let lab: Vec<Lab> = samples.iter().map(|&c| to_lab(c)).collect();
        let run = get_kmeans(
            self.max_colors,
            self.max_iterations,
            CONVERGENCE,
            false,
            &lab,
            self.seed,
        );

        let mut counts = vec![0u32; run.centroids.len()];
        for &index in &run.indices {
            if let Some(count) = counts.get_mut(index as usize) {
                *count += 1;
            }
        }

        // Centroids can round to the same 8-bit color; fold those together
        let mut merged: HashMap<Rgb, u32> = HashMap::new();
        for (centroid, count) in run.centroids.iter().zip(counts) {
            if count == 0 {
                continue;
            }
            *merged.entry(from_lab(*centroid)).or_insert(0) += count;
        }

        merged
            .into_iter()
            .map(|(color, population)| Cluster { color, population })
            .collect()
    }
}

/// Population descending, ties broken by color so output order is stable.
fn sort_clusters(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    clusters.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.color.to_bytes().cmp(&b.color.to_bytes()))
    });
    clusters
}

fn to_lab(color: Rgb) -> Lab {
    Srgb::new(color.r, color.g, color.b)
        .into_format::<f32>()
        .into_color()
}

fn from_lab(lab: Lab) -> Rgb {
    let rgb: Srgb = lab.into_color();
    let rgb = rgb.into_format::<u8>();
    Rgb::new(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(colors: &[(Rgb, usize)]) -> PixelSource {
        let pixels: Vec<Rgb> = colors
            .iter()
            .flat_map(|&(c, n)| std::iter::repeat(c).take(n))
            .collect();
        PixelSource::from_colors(&pixels)
    }

    #[test]
    fn test_few_colors_are_counted_exactly() {
        let red = Rgb::new(200, 30, 30);
        let blue = Rgb::new(30, 30, 200);
        let clusters = Quantizer::new(8, 1)
            .quantize(&source(&[(red, 3), (blue, 7)]))
            .unwrap();
        assert_eq!(
            clusters,
            vec![
                Cluster {
                    color: blue,
                    population: 7
                },
                Cluster {
                    color: red,
                    population: 3
                },
            ]
        );
    }

    #[test]
    fn test_kmeans_bounds_cluster_count() {
        let colors: Vec<(Rgb, usize)> = (0..40u8)
            .map(|i| (Rgb::new(i * 6, 255 - i * 6, 100), 2))
            .collect();
        let clusters = Quantizer::new(4, 1).quantize(&source(&colors)).unwrap();
        assert!(!clusters.is_empty() && clusters.len() <= 4);
        let total: u32 = clusters.iter().map(|c| c.population).sum();
        assert_eq!(total, 80);
        assert!(clusters.windows(2).all(|w| w[0].population >= w[1].population));
    }

    #[test]
    fn test_deterministic() {
        let colors: Vec<(Rgb, usize)> = (0..30u8)
            .map(|i| (Rgb::new(i * 8, i * 3, 255 - i * 8), 1 + i as usize % 3))
            .collect();
        let src = source(&colors);
        let q = Quantizer::new(5, 1);
        assert_eq!(q.quantize(&src).unwrap(), q.quantize(&src).unwrap());
    }

    #[test]
    fn test_stride_subsamples() {
        let red = Rgb::new(200, 30, 30);
        let clusters = Quantizer::new(4, 5).quantize(&source(&[(red, 10)])).unwrap();
        assert_eq!(clusters[0].population, 2);
    }

    #[test]
    fn test_transparent_and_degenerate_sources_are_empty() {
        assert!(Quantizer::new(4, 1)
            .quantize(&PixelSource::degenerate(125))
            .unwrap()
            .is_empty());
        let clear = PixelSource::from_pixels(vec![[255, 0, 0, 0]; 4], 2, 2, 125);
        assert!(Quantizer::new(4, 1).quantize(&clear).unwrap().is_empty());
    }

    #[test]
    fn test_zero_colors_is_an_error() {
        let err = Quantizer::new(0, 1).quantize(&PixelSource::degenerate(125));
        assert!(matches!(err, Err(ExtractError::InvalidParameter { .. })));
    }

    #[test]
    fn test_lab_round_trip_is_close() {
        for color in [Rgb::new(10, 200, 10), Rgb::new(225, 138, 36), Rgb::new(0, 0, 0)] {
            let back = from_lab(to_lab(color));
            for (a, b) in color.to_bytes().into_iter().zip(back.to_bytes()) {
                assert!(a.abs_diff(b) <= 1, "{color} -> {back}");
            }
        }
    }
}
