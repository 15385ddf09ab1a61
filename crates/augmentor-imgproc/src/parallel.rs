use rayon::prelude::*;

use augmentor_image::Image;

/// Number of pixels from which [`ExecutionStrategy::Auto`] runs in parallel.
pub const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

/// Controls how row-wise image operations are executed.
///
/// The strategy only decides how rows are scheduled; every strategy produces
/// bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Run in parallel for images of at least [`AUTO_PARALLEL_THRESHOLD`] pixels,
    /// serially otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    Parallel,
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels should be processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
        }
    }
}

/// Apply a function to every row of a flat buffer, passing the row index.
///
/// # Arguments
///
/// * `data` - The buffer, a whole number of rows long.
/// * `row_len` - The number of elements in a row (width * channels).
/// * `parallel` - Whether to schedule the rows on the Rayon thread pool.
/// * `f` - The function receiving `(row_index, row)`.
pub fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    if parallel {
        data.par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        data.chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}
