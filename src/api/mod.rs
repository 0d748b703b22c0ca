pub mod cache;
pub mod colors;

pub use cache::{handle_clear, handle_invalidate, InvalidateResponse, __path_handle_clear};
pub use cache::__path_handle_invalidate;
pub use colors::{handle_colors, ColorQuery, ColorResponse, __path_handle_colors};
