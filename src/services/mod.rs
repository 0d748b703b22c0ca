pub mod color_cache;
pub mod color_resolver;
pub mod image_loader;
pub mod theme_service;

pub use color_cache::BoundedCache;
pub use color_resolver::{ColorResolver, ResolvedColors};
pub use image_loader::{DecodedImage, FsImageLoader, ImageLoader};
pub use theme_service::{EntityTheme, ThemeRequest, ThemeService};
