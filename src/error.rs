//! Error type shared by all histogram operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistogramError>;

#[derive(Error, Debug)]
pub enum HistogramError {
    /// A histogram was requested for an array without samples.
    #[error("empty input: {0} has no samples")]
    EmptyInput(&'static str),

    /// Array rank or channel count is not one we know how to process.
    #[error("unsupported image shape {shape:?}: {reason}")]
    Shape { shape: Vec<usize>, reason: String },

    #[error("shape mismatch: source {source_shape:?} vs reference {reference_shape:?}")]
    ShapeMismatch {
        source_shape: Vec<usize>,
        reference_shape: Vec<usize>,
    },

    #[error("histogram specification requires a reference image")]
    MissingReference,

    #[error("unknown method '{0}' (expected 'equalization' or 'specification')")]
    UnknownMethod(String),

    #[error("config error {0}")]
    Config(String),

    #[error("config parse error {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error {0}")]
    Io(#[from] std::io::Error),
}

pub fn shape_error(shape: &[usize], reason: impl ToString) -> HistogramError {
    HistogramError::Shape {
        shape: shape.to_vec(),
        reason: reason.to_string(),
    }
}

pub fn config_error(msg: impl ToString) -> HistogramError {
    HistogramError::Config(msg.to_string())
}
