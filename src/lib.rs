//! Avatar Tint
//!
//! Readable theme colors from avatar images, served over HTTP and from the
//! command line. The color science lives in the `swatch-theme` crate; this
//! crate adds image loading, caching, configuration and the outer surfaces.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
