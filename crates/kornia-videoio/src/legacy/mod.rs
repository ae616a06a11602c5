//! Single-phase capture and writer sources from the older backend API.
//!
//! Older backends expose one `grab` call and hand back raw images that carry
//! their own row stride and raster origin. [`LegacyCapture`] and
//! [`LegacyWriter`] take ownership of such a resource and present it through
//! [`crate::VideoCapture`] and [`crate::VideoWriter`].

mod capture;
mod raw;
mod writer;

pub use capture::LegacyCapture;
pub use raw::{LegacyCaptureSource, LegacyWriterSink, RasterOrigin, RawImage};
pub use writer::LegacyWriter;
