use kornia_raster::Image;

use super::raw::{LegacyWriterSink, RawImage};
use crate::backend::BackendId;
use crate::writer::VideoWriter;

/// Presents a [`LegacyWriterSink`] through [`VideoWriter`].
///
/// The adapter owns the sink and drops it exactly once, when the adapter is
/// dropped. The legacy writer API has no property setter.
pub struct LegacyWriter {
    sink: Option<Box<dyn LegacyWriterSink>>,
}

impl LegacyWriter {
    /// Take ownership of `sink`.
    pub fn new(sink: Option<Box<dyn LegacyWriterSink>>) -> Self {
        Self { sink }
    }

    /// The wrapped sink, if any.
    pub fn raw(&self) -> Option<&dyn LegacyWriterSink> {
        self.sink.as_deref()
    }
}

impl VideoWriter for LegacyWriter {
    fn property(&self, prop_id: i32) -> f64 {
        self.sink
            .as_ref()
            .map_or(0.0, |sink| sink.property(prop_id))
    }

    fn set_property(&mut self, _prop_id: i32, _value: f64) -> bool {
        false
    }

    fn is_opened(&self) -> bool {
        self.sink.is_some()
    }

    fn write(&mut self, image: &Image) -> bool {
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };
        sink.write_frame(&RawImage::from_image(image))
    }

    fn backend_id(&self) -> BackendId {
        self.sink
            .as_ref()
            .map_or(BackendId(0), |sink| sink.capture_domain())
    }
}

impl Drop for LegacyWriter {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            log::debug!("Releasing legacy writer ({}).", sink.capture_domain());
        }
    }
}
