use kornia_raster::{Image, ImageSize, PixelDepth};

use crate::backend::BackendId;
use crate::error::VideoIoError;

/// Which image row is stored first in a raw buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RasterOrigin {
    /// Row 0 is the top of the picture.
    #[default]
    TopLeft,
    /// Row 0 is the bottom of the picture.
    BottomLeft,
}

/// An image as produced or consumed by a legacy backend.
///
/// Rows may be padded: `width_step` is the distance in bytes between the start
/// of two consecutive rows.
#[derive(Clone, Debug, PartialEq)]
pub struct RawImage {
    size: ImageSize,
    channels: usize,
    depth: PixelDepth,
    origin: RasterOrigin,
    width_step: usize,
    data: Vec<u8>,
}

impl RawImage {
    /// Wrap a raw buffer. The layout is checked when the image is converted.
    pub fn new(
        size: ImageSize,
        channels: usize,
        depth: PixelDepth,
        origin: RasterOrigin,
        width_step: usize,
        data: Vec<u8>,
    ) -> Self {
        Self {
            size,
            channels,
            depth,
            origin,
            width_step,
            data,
        }
    }

    /// A top-left, unpadded copy of `image`.
    pub fn from_image(image: &Image) -> Self {
        Self {
            size: image.size(),
            channels: image.num_channels(),
            depth: image.depth(),
            origin: RasterOrigin::TopLeft,
            width_step: image.row_bytes(),
            data: image.as_slice().to_vec(),
        }
    }

    /// Copy the rows, in stored order, into a packed [`Image`].
    ///
    /// # Errors
    ///
    /// Fails if `width_step` or the buffer length do not fit the declared size.
    pub fn to_image(&self) -> Result<Image, VideoIoError> {
        Ok(Image::from_strided(
            self.size,
            self.channels,
            self.depth,
            self.width_step,
            &self.data,
        )?)
    }

    /// The size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of interleaved channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// The storage type of each channel value.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Which row is stored first.
    #[inline]
    pub fn origin(&self) -> RasterOrigin {
        self.origin
    }

    /// Bytes between the start of two consecutive rows.
    #[inline]
    pub fn width_step(&self) -> usize {
        self.width_step
    }

    /// The raw buffer, padding included.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// A capture resource from the legacy backend API.
///
/// Grabbing and decoding happen behind [`LegacyCaptureSource::grab_frame`];
/// [`LegacyCaptureSource::retrieve_frame`] only hands out the image the source
/// keeps for the requested channel. The resource is released when dropped.
pub trait LegacyCaptureSource {
    /// Read a backend-defined property, `0.0` if unsupported.
    fn property(&self, _prop_id: i32) -> f64 {
        0.0
    }

    /// Write a backend-defined property; returns whether it was accepted.
    fn set_property(&mut self, _prop_id: i32, _value: f64) -> bool {
        false
    }

    /// Grab the current frame.
    fn grab_frame(&mut self) -> bool {
        true
    }

    /// The image of `channel` for the last grabbed frame, if any.
    fn retrieve_frame(&mut self, _channel: i32) -> Option<&RawImage> {
        None
    }

    /// The backend this resource belongs to.
    fn capture_domain(&self) -> BackendId {
        BackendId::ANY
    }
}

/// A writer resource from the legacy backend API, released when dropped.
pub trait LegacyWriterSink {
    /// Encode and store one frame; returns whether it was written.
    fn write_frame(&mut self, _image: &RawImage) -> bool {
        false
    }

    /// The backend this resource belongs to.
    fn capture_domain(&self) -> BackendId {
        BackendId::ANY
    }

    /// Read a backend-defined property, `0.0` if unsupported.
    fn property(&self, _prop_id: i32) -> f64 {
        0.0
    }
}
