//! WebAssembly exports for HistoStag filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat row-major byte arrays plus their dimensions; errors are
//! raised as JavaScript exceptions.

use ndarray::{Array2, Array3, ArrayView1};
use wasm_bindgen::prelude::*;

use crate::filters::equalize::{equalize, equalize_color};
use crate::filters::specify::{specify, specify_channels};

// ============================================================================
// Equalization
// ============================================================================

/// Equalize a grayscale image.
///
/// # Arguments
/// * `data` - Flat array of samples (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of equalized samples
#[wasm_bindgen]
pub fn equalize_gray_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = Array2::from_shape_vec((height, width), data.to_vec())?;

    let result = equalize(input.view())?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Equalize an RGB or RGBA image on its luma channel.
///
/// # Arguments
/// * `data` - Flat array of pixels (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1, 3 or 4
#[wasm_bindgen]
pub fn equalize_color_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<u8>, JsError> {
    let input = Array3::from_shape_vec((height, width, channels), data.to_vec())?;

    let result = equalize_color(input.view())?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Specification
// ============================================================================

/// Match a grayscale image to the distribution of a reference sample set.
///
/// The reference is treated as a flat sample sequence, so its dimensions
/// are not needed.
#[wasm_bindgen]
pub fn specify_gray_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    reference: &[u8],
) -> Result<Vec<u8>, JsError> {
    let input = Array2::from_shape_vec((height, width), data.to_vec())?;

    let result = specify(input.view(), ArrayView1::from(reference))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Match a grayscale image once per channel of a reference image.
///
/// # Returns
/// Flat array of (height, width, ref_channels) pixels
#[wasm_bindgen]
pub fn specify_channels_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    reference: &[u8],
    ref_width: usize,
    ref_height: usize,
    ref_channels: usize,
) -> Result<Vec<u8>, JsError> {
    let input = Array2::from_shape_vec((height, width), data.to_vec())?;
    let reference = Array3::from_shape_vec((ref_height, ref_width, ref_channels), reference.to_vec())?;

    let result = specify_channels(input.view(), reference.view())?;
    Ok(result.into_raw_vec_and_offset().0)
}
