use kornia_raster::{Image, ImageSize};

use crate::backend::BackendId;

/// A sink of video frames.
///
/// Frames are committed as soon as [`VideoWriter::write`] is called; there is
/// no buffering phase. Many backends only expose read-only properties.
pub trait VideoWriter {
    /// Read a backend-defined property, `0.0` if unsupported.
    fn property(&self, _prop_id: i32) -> f64 {
        0.0
    }

    /// Write a backend-defined property; returns whether the backend accepted it.
    fn set_property(&mut self, _prop_id: i32, _value: f64) -> bool {
        false
    }

    /// Whether the underlying resource is valid and ready.
    fn is_opened(&self) -> bool;

    /// Write one frame to the output stream; `false` if it was not written.
    fn write(&mut self, image: &Image) -> bool;

    /// The backend that produced this instance.
    fn backend_id(&self) -> BackendId {
        BackendId::ANY
    }
}

impl<W: VideoWriter + ?Sized> VideoWriter for Box<W> {
    fn property(&self, prop_id: i32) -> f64 {
        (**self).property(prop_id)
    }

    fn set_property(&mut self, prop_id: i32, value: f64) -> bool {
        (**self).set_property(prop_id, value)
    }

    fn is_opened(&self) -> bool {
        (**self).is_opened()
    }

    fn write(&mut self, image: &Image) -> bool {
        (**self).write(image)
    }

    fn backend_id(&self) -> BackendId {
        (**self).backend_id()
    }
}

/// Pack a four character code into its integer form, first character in the
/// lowest byte.
///
/// # Examples
///
/// ```
/// use kornia_videoio::writer::fourcc;
///
/// assert_eq!(fourcc(b"MJPG"), 0x47504a4d);
/// ```
pub const fn fourcc(code: &[u8; 4]) -> i32 {
    (code[0] as i32) | (code[1] as i32) << 8 | (code[2] as i32) << 16 | (code[3] as i32) << 24
}

/// Stream settings handed to a writer backend on open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WriterConfig {
    /// The codec as a packed four character code, see [`fourcc`].
    pub fourcc: i32,
    /// The frame rate of the output stream.
    pub fps: f64,
    /// The size of the frames that will be written.
    pub size: ImageSize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            fourcc: fourcc(b"MJPG"),
            fps: 30.0,
            size: ImageSize {
                width: 640,
                height: 480,
            },
        }
    }
}
