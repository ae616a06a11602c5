#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Backend identifiers and acceleration types.
///
/// Defines [`backend::BackendId`], the integer tag telling callers which backend
/// produced a handle.
pub mod backend;

/// The capture interface implemented by every video source.
///
/// See [`capture::VideoCapture`] for the two-phase grab/retrieve protocol.
pub mod capture;

/// Error types for parameter negotiation.
pub mod error;

/// Adapters bridging the single-phase legacy capture and writer API.
pub mod legacy;

/// Key-value parameters passed to backends when opening a stream.
///
/// See [`params::ParameterSet`] for lookup and consumption tracking.
pub mod params;

/// Registry of backend factories.
pub mod registry;

/// The writer interface implemented by every video sink.
pub mod writer;

pub use crate::backend::{BackendId, VideoAccelerationType};
pub use crate::capture::VideoCapture;
pub use crate::error::VideoIoError;
pub use crate::params::{CaptureParameters, ParameterSet, ParameterValue, WriterParameters};
pub use crate::registry::{BackendFactory, BackendRegistry, Locator};
pub use crate::writer::{VideoWriter, WriterConfig};

pub use kornia_raster::{Image, ImageSize, PixelDepth};
