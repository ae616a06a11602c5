use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use kornia_raster::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// The storage type of a single channel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelDepth {
    /// 8-bit unsigned.
    #[default]
    U8,
    /// 16-bit unsigned.
    U16,
    /// 32-bit float.
    F32,
}

impl PixelDepth {
    /// Number of bytes used by one channel value.
    #[inline]
    pub fn bytes(&self) -> usize {
        match self {
            PixelDepth::U8 => 1,
            PixelDepth::U16 => 2,
            PixelDepth::F32 => 4,
        }
    }
}

// Bytes in one packed row, `None` if the layout does not fit in memory.
fn packed_row_bytes(size: ImageSize, channels: usize, depth: PixelDepth) -> Option<usize> {
    size.width.checked_mul(channels)?.checked_mul(depth.bytes())
}

fn packed_len(
    size: ImageSize,
    channels: usize,
    depth: PixelDepth,
) -> Result<usize, ImageError> {
    packed_row_bytes(size, channels, depth)
        .and_then(|row_bytes| row_bytes.checked_mul(size.height))
        .ok_or(ImageError::LayoutOverflow(size, channels))
}

/// Represents an owned image with interleaved pixel data.
///
/// The pixel data is stored row by row without padding, so a row occupies
/// exactly [`Image::row_bytes`] bytes. The buffer carries no interpretation of
/// its channels; it is what backends hand to callers and callers hand to
/// writers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    size: ImageSize,
    channels: usize,
    depth: PixelDepth,
    data: Vec<u8>,
}

impl Image {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of interleaved channels.
    /// * `depth` - The storage type of each channel value.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image layout, or the
    /// layout itself overflows `usize`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kornia_raster::{Image, ImageSize, PixelDepth};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     PixelDepth::U8,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(
        size: ImageSize,
        channels: usize,
        depth: PixelDepth,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let expected = packed_len(size, channels, depth)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            channels,
            depth,
            data,
        })
    }

    /// Create a new image with the given layout and every byte set to `val`.
    pub fn from_size_val(
        size: ImageSize,
        channels: usize,
        depth: PixelDepth,
        val: u8,
    ) -> Result<Self, ImageError> {
        let data = vec![val; packed_len(size, channels, depth)?];
        Image::new(size, channels, depth, data)
    }

    /// Create an image by copying rows out of a padded buffer.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of interleaved channels.
    /// * `depth` - The storage type of each channel value.
    /// * `stride` - The distance in bytes between the start of two rows in `data`.
    /// * `data` - The padded source buffer.
    ///
    /// # Errors
    ///
    /// Fails if the stride is shorter than a row, `data` is too short to hold
    /// every row, or the layout overflows `usize`.
    pub fn from_strided(
        size: ImageSize,
        channels: usize,
        depth: PixelDepth,
        stride: usize,
        data: &[u8],
    ) -> Result<Self, ImageError> {
        let row_bytes = packed_row_bytes(size, channels, depth)
            .ok_or(ImageError::LayoutOverflow(size, channels))?;
        if stride < row_bytes {
            return Err(ImageError::InvalidRowStride { stride, row_bytes });
        }

        if size.height == 0 || row_bytes == 0 {
            return Image::new(size, channels, depth, Vec::new());
        }

        let needed = stride
            .checked_mul(size.height - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(ImageError::LayoutOverflow(size, channels))?;
        if data.len() < needed {
            return Err(ImageError::InvalidChannelShape(data.len(), needed));
        }

        let mut packed = Vec::with_capacity(row_bytes * size.height);
        for y in 0..size.height {
            let start = y * stride;
            packed.extend_from_slice(&data[start..start + row_bytes]);
        }

        Image::new(size, channels, depth, packed)
    }

    /// Make the image hold `size`, `channels` and `depth`.
    ///
    /// The pixel data is kept when the layout already matches, otherwise the
    /// buffer is resized and its content is unspecified.
    pub fn reallocate(&mut self, size: ImageSize, channels: usize, depth: PixelDepth) {
        if self.size == size && self.channels == channels && self.depth == depth {
            return;
        }
        let len = size.width * size.height * channels * depth.bytes();
        self.data.resize(len, 0);
        self.size = size;
        self.channels = channels;
        self.depth = depth;
    }

    /// Drop the pixel data and reset the image to the empty state.
    pub fn release(&mut self) {
        *self = Image::default();
    }

    /// Whether the image holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Get the storage type of each channel value.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Number of bytes in one row of pixels.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.size.width * self.channels * self.depth.bytes()
    }

    /// Get the pixel data of the image.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the bytes of row `y`.
    ///
    /// # Errors
    ///
    /// If the row index is out of bounds, an error is returned.
    pub fn row(&self, y: usize) -> Result<&[u8], ImageError> {
        if y >= self.rows() {
            return Err(ImageError::RowIndexOutOfBounds(y, self.rows()));
        }
        let row_bytes = self.row_bytes();
        Ok(&self.data[y * row_bytes..(y + 1) * row_bytes])
    }
}
