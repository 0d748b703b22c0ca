//! Image to theme color resolution with caching.
//!
//! The resolver owns the extraction pipeline, the selector and two bounded
//! caches: one for palettes keyed by image identity and one for resolved
//! colors keyed by identity, request and boosts. Every key for an image
//! starts with `"{identity}|"`, so invalidating an image is a prefix
//! invalidation on both caches. `%` and `|` inside an identity are written
//! as `%25` and `%7C` in keys.
//!
//! Concurrent requests for the same uncached image share one extraction.
//! Results of failed loads, and of extractions that overlap an
//! invalidation, are returned but never cached.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use swatch_theme::{Boosts, CategoryToken, Palette, PalettePipeline, Rgb, Selector};
use tokio::sync::OnceCell;

use super::color_cache::BoundedCache;
use super::image_loader::{DecodedImage, FsImageLoader, ImageLoader};
use crate::models::{AppConfig, ImageSource};

/// A palette plus the invalidation epoch it is valid for.
///
/// `epoch` is `None` when nothing derived from the palette may be cached.
#[derive(Debug, Clone)]
struct Extraction {
    palette: Arc<Palette>,
    epoch: Option<u64>,
}

impl Extraction {
    fn transient(palette: Palette) -> Self {
        Self {
            palette: Arc::new(palette),
            epoch: None,
        }
    }
}

/// In-flight extractions by palette key.
type InFlight = Mutex<HashMap<String, Arc<OnceCell<Extraction>>>>;

/// Colors resolved from a single palette lookup.
#[derive(Debug, Clone)]
pub struct ResolvedColors {
    pub palette: Arc<Palette>,
    pub best: Option<Rgb>,
    /// `None` when no category was asked for, or it was `disabled`
    pub category: Option<Rgb>,
}

/// Resolves best and per-category colors for avatar images.
pub struct ColorResolver {
    pipeline: Arc<PalettePipeline>,
    selector: Selector,
    loader: Arc<dyn ImageLoader>,
    palettes: BoundedCache<Arc<Palette>>,
    colors: BoundedCache<Rgb>,
    in_flight: InFlight,
    // Bumped by every invalidation; held while storing extraction results
    epoch: Mutex<u64>,
    default_boosts: Boosts,
}

fn escape_identity(identity: &str) -> Cow<'_, str> {
    if identity.contains(['%', '|']) {
        Cow::Owned(identity.replace('%', "%25").replace('|', "%7C"))
    } else {
        Cow::Borrowed(identity)
    }
}

fn image_prefix(identity: &str) -> String {
    format!("{}|", escape_identity(identity))
}

fn palette_key(identity: &str) -> String {
    format!("{}|palette", escape_identity(identity))
}

fn color_key(identity: &str, request: &str, boosts: Boosts) -> String {
    format!(
        "{}|{request}|s{}|l{}",
        escape_identity(identity),
        boosts.saturation,
        boosts.lightness
    )
}

impl ColorResolver {
    pub fn new(
        pipeline: PalettePipeline,
        selector: Selector,
        loader: Arc<dyn ImageLoader>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            selector,
            loader,
            palettes: BoundedCache::new("palettes", cache_capacity),
            colors: BoundedCache::new("colors", cache_capacity),
            in_flight: Mutex::new(HashMap::new()),
            epoch: Mutex::new(0),
            default_boosts: Boosts::default(),
        }
    }

    /// Resolver wired from configuration with the filesystem loader.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.pipeline(),
            config.selector(),
            Arc::new(FsImageLoader::new(config.analysis.max_pixels)),
            config.cache.capacity,
        )
        .with_default_boosts(config.boosts)
    }

    /// Boosts used by callers that have no per-request value.
    pub fn with_default_boosts(mut self, boosts: Boosts) -> Self {
        self.default_boosts = boosts;
        self
    }

    pub fn default_boosts(&self) -> Boosts {
        self.default_boosts
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Number of cached (palettes, colors).
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.palettes.len(), self.colors.len())
    }

    /// Palette for an image, extracting it on a cache miss.
    ///
    /// Never fails: load or extraction problems are logged and give an
    /// empty or partial palette.
    pub async fn palette_for(&self, source: &ImageSource) -> Arc<Palette> {
        self.extraction(source).await.palette
    }

    async fn extraction(&self, source: &ImageSource) -> Extraction {
        let identity = source.identity();
        let key = palette_key(&identity);

        let epoch = self.current_epoch();
        if let Some(palette) = self.palettes.get(&key) {
            tracing::debug!(image = %identity, "Palette cache hit");
            return Extraction {
                palette,
                epoch: Some(epoch),
            };
        }

        let cell = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let extraction = cell
            .get_or_init(|| self.extract(source, &identity, &key))
            .await
            .clone();

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            in_flight.remove(&key);
        }

        extraction
    }

    async fn extract(&self, source: &ImageSource, identity: &str, key: &str) -> Extraction {
        let started = self.current_epoch();

        let image = match self.loader.load(source).await {
            Ok(image) => image,
            Err(e) => {
                // Not cached: the file may become readable later
                tracing::warn!(%e, image = %identity, "Failed to load image");
                return Extraction::transient(Palette::new());
            }
        };

        let palette = match self.run_pipeline(image).await {
            Some(palette) => Arc::new(palette),
            None => return Extraction::transient(Palette::new()),
        };

        tracing::debug!(
            image = %identity,
            swatches = palette.len(),
            "Extracted palette"
        );

        let epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        if *epoch != started {
            tracing::debug!(image = %identity, "Cache invalidated during extraction");
            return Extraction {
                palette,
                epoch: None,
            };
        }
        self.palettes.put(key, palette.clone());
        drop(epoch);

        Extraction {
            palette,
            epoch: Some(started),
        }
    }

    async fn run_pipeline(&self, image: DecodedImage) -> Option<Palette> {
        let pipeline = self.pipeline.clone();
        let report = tokio::task::spawn_blocking(move || {
            pipeline.extract_palette(&image.rgba, image.width, image.height)
        })
        .await;

        let report = match report {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(%e, "Palette extraction task failed");
                return None;
            }
        };

        if let Some(e) = &report.primary_error {
            tracing::warn!(%e, "Primary extractor failed");
        }
        if let Some(e) = &report.secondary_error {
            tracing::warn!(%e, "Secondary extractor failed");
        }
        if report.degenerate {
            tracing::debug!("Image has no usable pixels");
        }
        Some(report.palette)
    }

    fn current_epoch(&self) -> u64 {
        *self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cache a color picked from `extraction` unless it was superseded.
    fn store_color(
        &self,
        key: String,
        extraction: &Extraction,
        color: Option<Rgb>,
    ) -> Option<Rgb> {
        let color = color?;
        let epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        if extraction.epoch == Some(*epoch) {
            self.colors.put(key, color);
        }
        drop(epoch);
        Some(color)
    }

    /// Best readable color for an image.
    pub async fn resolve_best_color(&self, source: &ImageSource, boosts: Boosts) -> Option<Rgb> {
        let key = color_key(&source.identity(), "best", boosts);
        if let Some(color) = self.colors.get(&key) {
            return Some(color);
        }

        let extraction = self.extraction(source).await;
        let color = self.selector.best_color(&extraction.palette, boosts);
        self.store_color(key, &extraction, color)
    }

    /// Readable color for one category of an image.
    ///
    /// `Disabled` returns `None` without loading or extracting anything.
    pub async fn resolve_category_color(
        &self,
        source: &ImageSource,
        token: CategoryToken,
        boosts: Boosts,
    ) -> Option<Rgb> {
        let category = token.category()?;
        let key = color_key(&source.identity(), category.name(), boosts);
        if let Some(color) = self.colors.get(&key) {
            return Some(color);
        }

        let extraction = self.extraction(source).await;
        let color = self.selector.category_color(&extraction.palette, token, boosts);
        self.store_color(key, &extraction, color)
    }

    /// Palette, best color and optional category color from one lookup.
    ///
    /// The image is loaded at most once, even when nothing about it can be
    /// cached.
    pub async fn resolve_colors(
        &self,
        source: &ImageSource,
        token: Option<CategoryToken>,
        boosts: Boosts,
    ) -> ResolvedColors {
        let identity = source.identity();
        let extraction = self.extraction(source).await;

        let key = color_key(&identity, "best", boosts);
        let best = match self.colors.get(&key) {
            Some(color) => Some(color),
            None => {
                let color = self.selector.best_color(&extraction.palette, boosts);
                self.store_color(key, &extraction, color)
            }
        };

        let category = match token.and_then(|t| t.category().map(|c| (t, c))) {
            Some((token, category)) => {
                let key = color_key(&identity, category.name(), boosts);
                match self.colors.get(&key) {
                    Some(color) => Some(color),
                    None => {
                        let color =
                            self.selector.category_color(&extraction.palette, token, boosts);
                        self.store_color(key, &extraction, color)
                    }
                }
            }
            None => None,
        };

        ResolvedColors {
            palette: extraction.palette,
            best,
            category,
        }
    }

    /// Drop everything cached for one image.
    pub fn invalidate_image(&self, identity: &str) -> usize {
        self.invalidate_prefix(&image_prefix(identity))
    }

    /// Drop every palette and color whose key starts with `prefix`.
    ///
    /// Extractions still running when this is called are not cached.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let removed = {
            let mut epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
            *epoch = epoch.wrapping_add(1);
            self.in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|key, _| !key.starts_with(prefix));
            self.palettes.invalidate_prefix(prefix) + self.colors.invalidate_prefix(prefix)
        };
        tracing::info!(prefix, removed, "Cache invalidated");
        removed
    }
}
