use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::image::Image;

/// Flip the input image vertically.
///
/// Row `i` of `dst` becomes row `rows - 1 - i` of `src`. Rows are copied byte
/// for byte, so the result is exact for every pixel depth. `dst` is
/// reallocated to the layout of `src`; an empty `src` leaves `dst` empty.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
///
/// # Example
///
/// ```
/// use kornia_raster::{flip::vertical_flip, Image, PixelDepth};
///
/// let image = Image::new([2, 3].into(), 1, PixelDepth::U8, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let mut flipped = Image::default();
///
/// vertical_flip(&image, &mut flipped);
///
/// assert_eq!(flipped.as_slice(), &[4, 5, 2, 3, 0, 1]);
/// ```
pub fn vertical_flip(src: &Image, dst: &mut Image) {
    let row_bytes = src.row_bytes();
    if src.is_empty() || row_bytes == 0 {
        dst.release();
        return;
    }

    dst.reallocate(src.size(), src.num_channels(), src.depth());

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_bytes)
        .zip_eq(src.as_slice().par_chunks_exact(row_bytes).rev())
        .for_each(|(dst_row, src_row)| {
            dst_row.copy_from_slice(src_row);
        });
}
