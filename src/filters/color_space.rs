//! Luma/chroma conversions for 8-bit RGB.
//!
//! Uses ITU-R BT.601 luma weights and the 8-bit YCrCb encoding with chroma
//! centered on 128, the same constants common camera pipelines use.

use ndarray::{Array2, Array3, ArrayView3};

/// ITU-R BT.601 luma coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

const CR_SCALE: f32 = 0.713;
const CB_SCALE: f32 = 0.564;
const CHROMA_OFFSET: f32 = 128.0;

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn luma_f32(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// BT.601 luma of one RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    to_u8(luma_f32(r as f32, g as f32, b as f32))
}

/// Convert one RGB pixel to (Y, Cr, Cb).
#[inline]
pub fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let y = luma_f32(r, g, b);
    let cr = (r - y) * CR_SCALE + CHROMA_OFFSET;
    let cb = (b - y) * CB_SCALE + CHROMA_OFFSET;
    (to_u8(y), to_u8(cr), to_u8(cb))
}

/// Convert one (Y, Cr, Cb) pixel back to RGB.
#[inline]
pub fn ycrcb_to_rgb(y: u8, cr: u8, cb: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let cr = cr as f32 - CHROMA_OFFSET;
    let cb = cb as f32 - CHROMA_OFFSET;

    let r = y + 1.403 * cr;
    let g = y - 0.714 * cr - 0.344 * cb;
    let b = y + 1.773 * cb;
    (to_u8(r), to_u8(g), to_u8(b))
}

/// Luma plane of an RGB or RGBA image (alpha ignored).
///
/// # Arguments
/// * `input` - Image with at least 3 channels (height, width, channels)
pub fn luma_plane(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
    })
}

/// Split an RGB(A) image into Y, Cr and Cb planes.
pub fn split_ycrcb(input: ArrayView3<u8>) -> (Array2<u8>, Array2<u8>, Array2<u8>) {
    let (height, width, _) = input.dim();
    let mut luma = Array2::<u8>::zeros((height, width));
    let mut cr = Array2::<u8>::zeros((height, width));
    let mut cb = Array2::<u8>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let (l, r, b) = rgb_to_ycrcb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            luma[[y, x]] = l;
            cr[[y, x]] = r;
            cb[[y, x]] = b;
        }
    }
    (luma, cr, cb)
}

/// Recombine Y, Cr and Cb planes into an image with `channels` channels.
///
/// With 4 channels the alpha plane is taken from `alpha_source`.
pub fn merge_ycrcb(
    luma: &Array2<u8>,
    cr: &Array2<u8>,
    cb: &Array2<u8>,
    alpha_source: ArrayView3<u8>,
) -> Array3<u8> {
    let (height, width, channels) = alpha_source.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = ycrcb_to_rgb(luma[[y, x]], cr[[y, x]], cb[[y, x]]);
            output[[y, x, 0]] = r;
            output[[y, x, 1]] = g;
            output[[y, x, 2]] = b;
            if channels == 4 {
                output[[y, x, 3]] = alpha_source[[y, x, 3]];
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_gray_is_identity() {
        for v in [0u8, 1, 77, 128, 200, 255] {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn test_luma_primaries() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        let (y, cr, cb) = rgb_to_ycrcb(90, 90, 90);

        assert_eq!(y, 90);
        assert_eq!(cr, 128);
        assert_eq!(cb, 128);
        assert_eq!(ycrcb_to_rgb(y, cr, cb), (90, 90, 90));
    }

    #[test]
    fn test_ycrcb_round_trip_close() {
        let colors = [(200u8, 30u8, 40u8), (10, 180, 90), (60, 70, 220), (250, 250, 10)];
        for (r, g, b) in colors {
            let (y, cr, cb) = rgb_to_ycrcb(r, g, b);
            let (r2, g2, b2) = ycrcb_to_rgb(y, cr, cb);

            assert!((r as i32 - r2 as i32).abs() <= 3, "r {} vs {}", r, r2);
            assert!((g as i32 - g2 as i32).abs() <= 3, "g {} vs {}", g, g2);
            assert!((b as i32 - b2 as i32).abs() <= 3, "b {} vs {}", b, b2);
        }
    }

    #[test]
    fn test_merge_preserves_alpha() {
        let mut img = Array3::<u8>::zeros((1, 2, 4));
        img[[0, 0, 3]] = 17;
        img[[0, 1, 3]] = 200;

        let (l, cr, cb) = split_ycrcb(img.view());
        let merged = merge_ycrcb(&l, &cr, &cb, img.view());

        assert_eq!(merged[[0, 0, 3]], 17);
        assert_eq!(merged[[0, 1, 3]], 200);
        assert_eq!(merged[[0, 0, 0]], 0);
    }
}
