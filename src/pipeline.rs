//! Dispatch from a [`HistogramConfig`] to the transforms.

use tracing::{debug, info};

use crate::config::{HistogramConfig, Method};
use crate::error::{HistogramError, Result};
use crate::filters::equalize::equalize_image;
use crate::filters::specify::specify_image;
use crate::image::Image;

/// Run the configured transform on in-memory images.
///
/// # Arguments
/// * `config` - Method and shape policy; paths are not read here
/// * `source` - Image to transform
/// * `reference` - Reference image, required for specification
///
/// # Returns
/// For equalization an image of the source's variant and shape. For
/// specification the source is reduced to its luma channel and the result
/// follows the reference's variant.
///
/// # Errors
/// `MissingReference` for specification without a reference,
/// `ShapeMismatch` when `require_matching_shape` is set and height/width
/// differ, plus whatever the transform itself reports.
pub fn run(config: &HistogramConfig, source: &Image, reference: Option<&Image>) -> Result<Image> {
    info!(method = %config.method, shape = ?source.shape(), "running histogram transform");

    match config.method {
        Method::Equalization => equalize_image(source),
        Method::Specification => {
            let reference = reference.ok_or(HistogramError::MissingReference)?;

            if config.require_matching_shape
                && (source.height(), source.width()) != (reference.height(), reference.width())
            {
                return Err(HistogramError::ShapeMismatch {
                    source_shape: source.shape().to_vec(),
                    reference_shape: reference.shape().to_vec(),
                });
            }

            let luma = source.to_luma();
            debug!(
                reference_channels = reference.channel_count(),
                "matching luma against reference"
            );
            specify_image(&luma, reference)
        }
    }
}
