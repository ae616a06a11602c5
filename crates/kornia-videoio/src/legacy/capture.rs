use kornia_raster::{flip, Image};

use super::raw::{LegacyCaptureSource, RasterOrigin};
use crate::backend::BackendId;
use crate::capture::VideoCapture;

/// Presents a [`LegacyCaptureSource`] through [`VideoCapture`].
///
/// The adapter owns the source and drops it exactly once, when the adapter
/// itself is dropped. A missing source is tolerated: some legacy backends
/// return a shell object even when the device failed to open, so every
/// operation checks for it and reports failure instead.
pub struct LegacyCapture {
    source: Option<Box<dyn LegacyCaptureSource>>,
}

impl LegacyCapture {
    /// Take ownership of `source`.
    pub fn new(source: Option<Box<dyn LegacyCaptureSource>>) -> Self {
        Self { source }
    }

    /// The wrapped source, if any.
    pub fn raw(&self) -> Option<&dyn LegacyCaptureSource> {
        self.source.as_deref()
    }
}

impl VideoCapture for LegacyCapture {
    fn property(&self, prop_id: i32) -> f64 {
        self.source
            .as_ref()
            .map_or(0.0, |source| source.property(prop_id))
    }

    fn set_property(&mut self, prop_id: i32, value: f64) -> bool {
        self.source
            .as_mut()
            .is_some_and(|source| source.set_property(prop_id, value))
    }

    fn grab_frame(&mut self) -> bool {
        self.source
            .as_mut()
            .is_some_and(|source| source.grab_frame())
    }

    fn retrieve_frame(&mut self, stream_idx: i32, image: &mut Image) -> bool {
        let Some(raw) = self
            .source
            .as_mut()
            .and_then(|source| source.retrieve_frame(stream_idx))
        else {
            image.release();
            return false;
        };

        let frame = match raw.to_image() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Dropping malformed legacy frame on channel {stream_idx}: {e}");
                image.release();
                return false;
            }
        };

        match raw.origin() {
            RasterOrigin::TopLeft => *image = frame,
            RasterOrigin::BottomLeft => flip::vertical_flip(&frame, image),
        }

        true
    }

    /// The legacy API cannot report a closed stream, so this only checks that
    /// a source is present.
    fn is_opened(&self) -> bool {
        self.source.is_some()
    }

    fn backend_id(&self) -> BackendId {
        self.source
            .as_ref()
            .map_or(BackendId(0), |source| source.capture_domain())
    }
}

impl Drop for LegacyCapture {
    fn drop(&mut self) {
        if let Some(source) = self.source.take() {
            log::debug!("Releasing legacy capture ({}).", source.capture_domain());
        }
    }
}
