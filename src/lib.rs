//! HistoStag Rust Extensions
//!
//! Histogram equalization and histogram specification for 8-bit images,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! - **Grayscale**: (height, width) - single channel
//! - **RGB**: (height, width, 3) - 3 color channels
//! - **RGBA**: (height, width, 4) - 3 color channels + alpha
//!
//! Samples are `u8` (0-255). Channel count is inferred from input array
//! dimensions.
//!
//! ## Operations
//! - [`filters::equalize::equalize`] / [`filters::equalize::equalize_color`]:
//!   global histogram equalization
//! - [`filters::specify::specify`] / [`filters::specify::specify_channels`]:
//!   histogram specification against a reference
//! - [`pipeline::run`]: dispatch from a [`config::HistogramConfig`]

pub mod config;
pub mod error;
pub mod filters;
pub mod image;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{HistogramConfig, Method};
pub use error::{HistogramError, Result};
pub use image::Image;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{
        IntoPyArray, PyArray1, PyArray2, PyArray3, PyArrayDyn, PyReadonlyArray2,
        PyReadonlyArray3, PyReadonlyArrayDyn,
    };
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::HistogramError;
    use crate::filters::equalize as equalize_mod;
    use crate::filters::histogram::Histogram;
    use crate::filters::specify as specify_mod;
    use crate::image::Image;

    impl From<HistogramError> for PyErr {
        fn from(err: HistogramError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Equalization
    // ========================================================================

    /// Equalize a 2D u8 channel.
    #[pyfunction]
    pub fn equalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = equalize_mod::equalize(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Equalize a (H, W, C) u8 image on its luma channel.
    ///
    /// Accepts 1, 3 or 4 channels; alpha is preserved.
    #[pyfunction]
    pub fn equalize_color<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = equalize_mod::equalize_color(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Specification
    // ========================================================================

    /// Match a 2D u8 channel to the distribution of a reference of any shape.
    #[pyfunction]
    pub fn specify<'py>(
        py: Python<'py>,
        source: PyReadonlyArray2<'py, u8>,
        reference: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = specify_mod::specify(source.as_array(), reference.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Match a 2D u8 channel once per channel of a (H, W, C) reference.
    #[pyfunction]
    pub fn specify_channels<'py>(
        py: Python<'py>,
        source: PyReadonlyArray2<'py, u8>,
        reference: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = specify_mod::specify_channels(source.as_array(), reference.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Specify any source image against any reference image.
    ///
    /// Color sources are reduced to luma first.
    #[pyfunction]
    pub fn specify_image<'py>(
        py: Python<'py>,
        source: PyReadonlyArrayDyn<'py, u8>,
        reference: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
        let source = Image::from_dyn(source.as_array().to_owned())?;
        let reference = Image::from_dyn(reference.as_array().to_owned())?;
        let result = specify_mod::specify_image(&source.to_luma(), &reference)?;
        Ok(result.into_dyn().into_pyarray(py))
    }

    // ========================================================================
    // Histograms
    // ========================================================================

    /// 256-bin histogram of all samples of an array.
    #[pyfunction]
    pub fn histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray1<u64>>> {
        let hist = Histogram::from_samples(image.as_array().iter())?;
        Ok(hist.counts().to_vec().into_pyarray(py))
    }

    /// HistoStag Rust extension module
    #[pymodule]
    pub fn histostag(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(equalize, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_color, m)?)?;

        m.add_function(wrap_pyfunction!(specify, m)?)?;
        m.add_function(wrap_pyfunction!(specify_channels, m)?)?;
        m.add_function(wrap_pyfunction!(specify_image, m)?)?;

        m.add_function(wrap_pyfunction!(histogram, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::histostag;
