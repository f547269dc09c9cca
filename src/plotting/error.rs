use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("signal has no samples")]
    EmptySignal,
    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("label count mismatch: expected {expected} labels (one per channel), got {actual}")]
    LabelMismatch { expected: usize, actual: usize },
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("invalid sample window [{start}, {end}) for {len} samples")]
    InvalidWindow { start: usize, end: usize, len: usize },
    #[error("index {index} out of range for {len} samples")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("sample rate must be finite and greater than zero")]
    InvalidSampleRate,
    #[error("cannot infer image format from {0:?}; use .png, .jpg or .bmp")]
    UnsupportedFormat(PathBuf),
    #[error("label {0:?} cannot be used in a file name")]
    InvalidFileLabel(String),
    #[error("failed to render figure: {0}")]
    Render(String),
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid render config: {0}")]
    Config(String),
    #[error("figure viewer failed: {0}")]
    Viewer(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Render(value.to_string())
    }
}
impl From<serde_json::Error> for PlotError {
    fn from(value: serde_json::Error) -> Self {
        PlotError::Config(value.to_string())
    }
}
