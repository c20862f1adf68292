use thiserror::Error;
use wadocr_ocr::{FrameError, OcrError};

/// Error taxonomy of one module invocation.
///
/// Nothing is caught or retried inside the module: the first error aborts
/// the remaining regions of the current action and propagates to the host.
#[derive(Debug, Error)]
pub enum QcError {
    /// Malformed region parameters: bad `xywh`, unknown field or type,
    /// missing mandatory field.
    #[error("configuration error: {0}")]
    Config(String),

    /// Region rectangle falls outside the source frame.
    #[error("bounds error: {0}")]
    Bounds(#[from] FrameError),

    /// The OCR engine failed to produce text.
    #[error("recognition error: {0}")]
    Recognition(#[from] OcrError),

    /// Recognized text cannot be converted to the declared output type.
    #[error("coercion error for region {region}: {reason}")]
    Coercion { region: String, reason: String },

    /// Missing or unparseable DICOM header values.
    #[error("header error: {0}")]
    Header(String),

    #[error("DICOM read error: {0}")]
    Read(#[from] dicom_object::ReadError),

    #[error("pixel data error: {0}")]
    Pixels(#[from] dicom_pixeldata::Error),

    /// Two results written under the same name in one invocation.
    #[error("result {0:?} was already written")]
    DuplicateResult(String),

    /// Empty or unusable series file list.
    #[error("input error: {0}")]
    Input(String),

    #[error("image export error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
