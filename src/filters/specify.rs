//! Histogram specification (matching).
//!
//! Remaps a source channel so that its cumulative distribution follows the
//! cumulative distribution of a reference channel. Both arrays are flattened
//! before comparison, so the reference may have any shape; the output always
//! has the source's shape.
//!
//! Interpolated intensities are truncated towards zero when quantized back
//! to 8 bits.
//!
//! ## Multi-channel references
//!
//! [`specify_channels`] runs one independent specification per reference
//! color channel and stacks the results. There is no coupling between the
//! channels, so the output hue need not agree with the reference's.

use ndarray::{Array2, Array3, ArrayView, ArrayView2, ArrayView3, Axis, Dimension};
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{shape_error, Result};
use crate::filters::histogram::{DistinctIndex, Histogram};
use crate::image::Image;

/// Match `source` to the distribution of `reference`.
///
/// # Arguments
/// * `source` - Channel to remap (height, width)
/// * `reference` - Channel whose distribution is matched, any shape
///
/// # Returns
/// New array with the source's shape
///
/// # Errors
/// `EmptyInput` if either array has no samples.
pub fn specify<D: Dimension>(
    source: ArrayView2<u8>,
    reference: ArrayView<u8, D>,
) -> Result<Array2<u8>> {
    let index = DistinctIndex::build(source.iter())?;
    let reference_cdf = Histogram::from_samples(reference.iter())?.cdf();
    let source_cdf = index.cdf();

    debug!(
        source_distinct = index.values().len(),
        reference_distinct = reference_cdf.len(),
        samples = index.sample_count(),
        "specifying channel"
    );

    // one mapped intensity per distinct source value
    let mapped: Vec<u8> = source_cdf
        .probabilities()
        .iter()
        .map(|&p| reference_cdf.interpolate(p) as u8)
        .collect();

    for (v, m) in index.values().iter().zip(&mapped) {
        trace!(from = *v, to = *m, "mapping");
    }

    let output: Vec<u8> = index
        .inverse()
        .iter()
        .map(|&bin| mapped[bin as usize])
        .collect();

    Array2::from_shape_vec(source.dim(), output)
        .map_err(|e| shape_error(source.shape(), e))
}

/// Match `source` once per color channel of `reference`.
///
/// # Arguments
/// * `source` - Channel to remap (height, width)
/// * `reference` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// (height, width, channels) image with the reference's channel count.
/// For an RGBA reference the alpha channel is fully opaque.
///
/// # Errors
/// `Shape` for an unsupported channel count, `EmptyInput` for empty arrays.
pub fn specify_channels(source: ArrayView2<u8>, reference: ArrayView3<u8>) -> Result<Array3<u8>> {
    let (height, width) = source.dim();
    let channels = reference.dim().2;
    let color_channels = match channels {
        1 | 3 => channels,
        4 => 3,
        _ => {
            return Err(shape_error(
                reference.shape(),
                format!("{} channels (expected 1, 3 or 4)", channels),
            ))
        }
    };

    let planes = specify_each(source, reference, color_channels)?;

    let mut output = Array3::<u8>::zeros((height, width, channels));
    for (c, plane) in planes.iter().enumerate() {
        output.index_axis_mut(Axis(2), c).assign(plane);
    }
    if channels == 4 {
        output.index_axis_mut(Axis(2), 3).fill(255);
    }
    Ok(output)
}

#[cfg(not(target_arch = "wasm32"))]
fn specify_each(
    source: ArrayView2<u8>,
    reference: ArrayView3<u8>,
    color_channels: usize,
) -> Result<Vec<Array2<u8>>> {
    (0..color_channels)
        .into_par_iter()
        .map(|c| specify(source, reference.index_axis(Axis(2), c)))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn specify_each(
    source: ArrayView2<u8>,
    reference: ArrayView3<u8>,
    color_channels: usize,
) -> Result<Vec<Array2<u8>>> {
    (0..color_channels)
        .map(|c| specify(source, reference.index_axis(Axis(2), c)))
        .collect()
}

/// Match a source channel against either reference variant.
///
/// A grayscale reference yields a grayscale result, a color reference a
/// color result.
pub fn specify_image(source: &Array2<u8>, reference: &Image) -> Result<Image> {
    match reference {
        Image::Grayscale(gray) => Ok(Image::Grayscale(specify(source.view(), gray.view())?)),
        Image::Color(color) => Ok(Image::Color(specify_channels(source.view(), color.view())?)),
    }
}
