//! Global histogram equalization.
//!
//! Single channels are remapped through `round(255 * cdf[v])`. Color images
//! are equalized on their luma plane only: the image is split into Y, Cr and
//! Cb, Y is equalized and the planes are recombined, so contrast changes
//! without shifting hue.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width) or (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha preserved

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use tracing::debug;

use crate::error::{shape_error, Result};
use crate::filters::color_space::{merge_ycrcb, split_ycrcb};
use crate::filters::histogram::{Histogram, LEVELS};
use crate::image::Image;

/// Build the equalization lookup table for a histogram.
///
/// The table is non-decreasing; neighbouring levels may share an output.
pub fn equalization_lut(hist: &Histogram) -> [u8; LEVELS] {
    let cdf = hist.dense_cdf();
    let mut lut = [0u8; LEVELS];
    for (v, &p) in cdf.iter().enumerate() {
        lut[v] = (255.0 * p).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Equalize a single channel.
///
/// # Arguments
/// * `channel` - 2D array of samples (height, width)
///
/// # Returns
/// New array of the same shape with a stretched intensity distribution
///
/// # Errors
/// `EmptyInput` if the channel has no samples.
pub fn equalize(channel: ArrayView2<u8>) -> Result<Array2<u8>> {
    let hist = Histogram::from_samples(channel.iter())?;
    let lut = equalization_lut(&hist);

    debug!(
        samples = hist.total(),
        distinct = hist.distinct_count(),
        "equalizing channel"
    );

    Ok(channel.mapv(|v| lut[v as usize]))
}

/// Equalize a channel-last image on its brightness.
///
/// # Arguments
/// * `image` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Equalized image with the same channel count
///
/// # Errors
/// `Shape` for any other channel count, `EmptyInput` for an empty image.
pub fn equalize_color(image: ArrayView3<u8>) -> Result<Array3<u8>> {
    let (_, _, channels) = image.dim();
    match channels {
        1 => {
            let equalized = equalize(image.index_axis(Axis(2), 0))?;
            Ok(equalized.insert_axis(Axis(2)))
        }
        3 | 4 => {
            let (luma, cr, cb) = split_ycrcb(image);
            let luma = equalize(luma.view())?;
            Ok(merge_ycrcb(&luma, &cr, &cb, image))
        }
        _ => Err(shape_error(
            image.shape(),
            format!("{} channels (expected 1, 3 or 4)", channels),
        )),
    }
}

/// Equalize either image variant.
pub fn equalize_image(image: &Image) -> Result<Image> {
    match image {
        Image::Grayscale(gray) => Ok(Image::Grayscale(equalize(gray.view())?)),
        Image::Color(color) => Ok(Image::Color(equalize_color(color.view())?)),
    }
}
