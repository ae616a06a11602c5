use kornia_raster::Image;

use crate::backend::BackendId;

/// A source of video frames.
///
/// Reading is split in two phases. [`VideoCapture::grab_frame`] advances the
/// stream and keeps the next raw frame inside the backend without decoding it;
/// [`VideoCapture::retrieve_frame`] decodes the grabbed frame into a caller
/// buffer. This lets a caller grab several independent streams back to back,
/// so their frames are as close in time as possible, and pay the decode cost
/// afterwards.
///
/// Failures are reported as `false`, never as errors: end of stream and
/// transient I/O failures look the same to the caller, who decides whether to
/// retry or stop. Implementations are not synchronized; a grab and the
/// following retrieve must not be interleaved with another grab on the same
/// instance.
pub trait VideoCapture {
    /// Read a backend-defined property, `0.0` if unsupported.
    fn property(&self, _prop_id: i32) -> f64 {
        0.0
    }

    /// Write a backend-defined property; returns whether the backend accepted it.
    fn set_property(&mut self, _prop_id: i32, _value: f64) -> bool {
        false
    }

    /// Advance to the next frame without decoding it.
    ///
    /// May block on backend I/O. Returns `false` at end of stream or on failure.
    fn grab_frame(&mut self) -> bool;

    /// Decode sub-stream `stream_idx` of the last grabbed frame into `image`.
    ///
    /// When no frame is pending, `image` is released and `false` is returned.
    fn retrieve_frame(&mut self, stream_idx: i32, image: &mut Image) -> bool;

    /// Whether the underlying resource is valid and ready.
    fn is_opened(&self) -> bool;

    /// The backend that produced this instance.
    fn backend_id(&self) -> BackendId {
        BackendId::ANY
    }

    /// Grab the next frame and retrieve its first sub-stream.
    fn read(&mut self, image: &mut Image) -> bool {
        if self.grab_frame() {
            self.retrieve_frame(0, image)
        } else {
            image.release();
            false
        }
    }
}

impl<C: VideoCapture + ?Sized> VideoCapture for Box<C> {
    fn property(&self, prop_id: i32) -> f64 {
        (**self).property(prop_id)
    }

    fn set_property(&mut self, prop_id: i32, value: f64) -> bool {
        (**self).set_property(prop_id, value)
    }

    fn grab_frame(&mut self) -> bool {
        (**self).grab_frame()
    }

    fn retrieve_frame(&mut self, stream_idx: i32, image: &mut Image) -> bool {
        (**self).retrieve_frame(stream_idx, image)
    }

    fn is_opened(&self) -> bool {
        (**self).is_opened()
    }

    fn backend_id(&self) -> BackendId {
        (**self).backend_id()
    }

    fn read(&mut self, image: &mut Image) -> bool {
        (**self).read(image)
    }
}

/// Grab one frame from every capture in turn.
///
/// Returns the indices of the captures whose grab succeeded, in order. The
/// frames can then be decoded with [`VideoCapture::retrieve_frame`].
pub fn grab_each<C: VideoCapture>(captures: &mut [C]) -> Vec<usize> {
    captures
        .iter_mut()
        .enumerate()
        .filter_map(|(i, capture)| capture.grab_frame().then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use kornia_raster::{Image, ImageError, PixelDepth};

    use super::{grab_each, VideoCapture};
    use crate::backend::BackendId;

    /// Yields `remaining` single-pixel frames holding a running counter.
    struct Counter {
        remaining: usize,
        pending: Option<u8>,
        next: u8,
    }

    impl Counter {
        fn new(remaining: usize) -> Self {
            Self {
                remaining,
                pending: None,
                next: 0,
            }
        }
    }

    impl VideoCapture for Counter {
        fn grab_frame(&mut self) -> bool {
            if self.remaining == 0 {
                self.pending = None;
                return false;
            }
            self.remaining -= 1;
            self.pending = Some(self.next);
            self.next += 1;
            true
        }

        fn retrieve_frame(&mut self, _stream_idx: i32, image: &mut Image) -> bool {
            match self.pending {
                Some(value) => {
                    image.reallocate([1, 1].into(), 1, PixelDepth::U8);
                    image.as_slice_mut()[0] = value;
                    true
                }
                None => {
                    image.release();
                    false
                }
            }
        }

        fn is_opened(&self) -> bool {
            true
        }
    }

    #[test]
    fn capture_defaults() {
        let mut capture = Counter::new(0);
        assert_eq!(capture.property(3), 0.0);
        assert!(!capture.set_property(3, 1.0));
        assert_eq!(capture.backend_id(), BackendId::ANY);
    }

    #[test]
    fn capture_read() {
        let mut capture = Counter::new(2);
        let mut image = Image::default();

        assert!(capture.read(&mut image));
        assert_eq!(image.as_slice(), &[0]);
        assert!(capture.read(&mut image));
        assert_eq!(image.as_slice(), &[1]);

        // end of stream clears the caller buffer
        assert!(!capture.read(&mut image));
        assert!(image.is_empty());
    }

    #[test]
    fn capture_retrieve_without_grab() -> Result<(), ImageError> {
        let mut capture = Counter::new(1);
        let mut image = Image::from_size_val([2, 2].into(), 1, PixelDepth::U8, 9)?;
        assert!(!capture.retrieve_frame(0, &mut image));
        assert!(image.is_empty());
        Ok(())
    }

    #[test]
    fn capture_grab_each() {
        let mut captures: Vec<Box<dyn VideoCapture>> = vec![
            Box::new(Counter::new(1)),
            Box::new(Counter::new(0)),
            Box::new(Counter::new(2)),
        ];
        assert_eq!(grab_each(&mut captures), vec![0, 2]);
        assert_eq!(grab_each(&mut captures), vec![2]);
        assert!(grab_each(&mut captures).is_empty());

        let mut image = Image::default();
        assert!(!captures[2].retrieve_frame(0, &mut image));
    }
}
