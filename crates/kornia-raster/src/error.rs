use crate::image::ImageSize;

/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a row stride cannot hold a full row of pixels.
    #[error("Row stride ({stride}) is smaller than the row size ({row_bytes})")]
    InvalidRowStride {
        /// The stride in bytes between two consecutive rows.
        stride: usize,
        /// The number of bytes a single row of pixels needs.
        row_bytes: usize,
    },

    /// Error when a row index is out of bounds.
    #[error("Row index ({0}) is out of bounds ({1})")]
    RowIndexOutOfBounds(usize, usize),

    /// Error when the byte length of an image layout does not fit in `usize`.
    #[error("Image layout {0} with {1} channels overflows the address space")]
    LayoutOverflow(ImageSize, usize),
}
