#![deny(missing_docs)]
//! Owned raster buffers exchanged between video backends

/// Error types for the raster module.
pub mod error;

/// Row-order transformations.
pub mod flip;

/// Owned raster buffer and its layout descriptors.
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, PixelDepth};
