//! Tagged image container.
//!
//! Images are either a single 2D channel or a channel-last 3D array with
//! 3 (RGB) or 4 (RGBA) channels. Operations dispatch on the variant instead
//! of inspecting array rank at runtime.

use ndarray::{Array2, Array3, ArrayD, Axis, Ix2, Ix3};

use crate::error::{shape_error, Result};
use crate::filters::color_space::luma_plane;
use crate::filters::histogram::Histogram;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// (height, width)
    Grayscale(Array2<u8>),
    /// (height, width, channels) with 3 or 4 channels
    Color(Array3<u8>),
}

impl Image {
    /// Wrap a channel-last array, squeezing single-channel 3D arrays.
    ///
    /// # Errors
    /// `Shape` if the channel count is not 1, 3 or 4.
    pub fn color(array: Array3<u8>) -> Result<Self> {
        match array.dim().2 {
            1 => Ok(Image::Grayscale(array.index_axis_move(Axis(2), 0))),
            3 | 4 => Ok(Image::Color(array)),
            n => Err(shape_error(
                array.shape(),
                format!("{} channels (expected 1, 3 or 4)", n),
            )),
        }
    }

    /// Wrap an array of any rank.
    ///
    /// # Errors
    /// `Shape` for ranks other than 2 and 3, or an unsupported channel count.
    pub fn from_dyn(array: ArrayD<u8>) -> Result<Self> {
        let shape = array.shape().to_vec();
        match array.ndim() {
            2 => array
                .into_dimensionality::<Ix2>()
                .map(Image::Grayscale)
                .map_err(|e| shape_error(&shape, e)),
            3 => {
                let array = array
                    .into_dimensionality::<Ix3>()
                    .map_err(|e| shape_error(&shape, e))?;
                Image::color(array)
            }
            n => Err(shape_error(&shape, format!("rank {} (expected 2 or 3)", n))),
        }
    }

    pub fn into_dyn(self) -> ArrayD<u8> {
        match self {
            Image::Grayscale(a) => a.into_dyn(),
            Image::Color(a) => a.into_dyn(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Image::Grayscale(a) => a.shape(),
            Image::Color(a) => a.shape(),
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Image::Grayscale(_) => 1,
            Image::Color(a) => a.dim().2,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.shape().iter().product()
    }

    /// Single brightness channel (BT.601 luma for color images).
    pub fn to_luma(&self) -> Array2<u8> {
        match self {
            Image::Grayscale(a) => a.clone(),
            Image::Color(a) => luma_plane(a.view()),
        }
    }

    /// One histogram per channel, alpha included.
    ///
    /// # Errors
    /// `EmptyInput` for an image without pixels.
    pub fn histograms(&self) -> Result<Vec<Histogram>> {
        match self {
            Image::Grayscale(a) => Ok(vec![Histogram::from_samples(a.iter())?]),
            Image::Color(a) => a
                .axis_iter(Axis(2))
                .map(|channel| Histogram::from_samples(channel.iter()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistogramError;
    use ndarray::IxDyn;

    #[test]
    fn test_from_dyn_grayscale() {
        let array = ArrayD::<u8>::zeros(IxDyn(&[4, 6]));
        let image = Image::from_dyn(array).unwrap();

        assert!(matches!(image, Image::Grayscale(_)));
        assert_eq!((image.height(), image.width()), (4, 6));
        assert_eq!(image.channel_count(), 1);
    }

    #[test]
    fn test_from_dyn_squeezes_single_channel() {
        let array = ArrayD::<u8>::zeros(IxDyn(&[3, 2, 1]));
        let image = Image::from_dyn(array).unwrap();

        assert!(matches!(image, Image::Grayscale(ref a) if a.dim() == (3, 2)));
    }

    #[test]
    fn test_from_dyn_color() {
        let image = Image::from_dyn(ArrayD::<u8>::zeros(IxDyn(&[2, 2, 4]))).unwrap();

        assert_eq!(image.channel_count(), 4);
        assert_eq!(image.sample_count(), 16);
        assert_eq!(image.into_dyn().shape(), &[2, 2, 4]);
    }

    #[test]
    fn test_from_dyn_rejects_bad_shapes() {
        let rank1 = Image::from_dyn(ArrayD::<u8>::zeros(IxDyn(&[5])));
        let rank4 = Image::from_dyn(ArrayD::<u8>::zeros(IxDyn(&[1, 2, 3, 4])));
        let two_channels = Image::from_dyn(ArrayD::<u8>::zeros(IxDyn(&[2, 2, 2])));

        assert!(matches!(rank1, Err(HistogramError::Shape { .. })));
        assert!(matches!(rank4, Err(HistogramError::Shape { .. })));
        assert!(matches!(two_channels, Err(HistogramError::Shape { .. })));
    }

    #[test]
    fn test_to_luma_color() {
        let mut array = Array3::<u8>::zeros((1, 2, 3));
        array[[0, 0, 0]] = 255;
        array[[0, 1, 0]] = 50;
        array[[0, 1, 1]] = 50;
        array[[0, 1, 2]] = 50;

        let luma = Image::color(array).unwrap().to_luma();

        assert_eq!(luma[[0, 0]], 76);
        assert_eq!(luma[[0, 1]], 50);
    }

    #[test]
    fn test_histograms_per_channel() {
        let mut array = Array3::<u8>::zeros((2, 2, 3));
        array.index_axis_mut(Axis(2), 1).fill(9);

        let hists = Image::color(array).unwrap().histograms().unwrap();

        assert_eq!(hists.len(), 3);
        assert_eq!(hists[0].counts()[0], 4);
        assert_eq!(hists[1].counts()[9], 4);
        assert!(hists.iter().all(|h| h.total() == 4));
    }

    #[test]
    fn test_histograms_empty_is_error() {
        let image = Image::Grayscale(Array2::<u8>::zeros((0, 0)));

        assert!(matches!(
            image.histograms(),
            Err(HistogramError::EmptyInput(_))
        ));
    }
}
