use thiserror::Error;

use crate::frame::{Frame, FrameError};

/// Text recognized from one frame.
#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub text: String,
    /// Mean recognition confidence in percent, when the backend reports one.
    pub mean_confidence: Option<f32>,
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("engine error: {0}")]
    EngineError(String),
}

/// A recognition backend converting a grayscale pixel frame into text.
///
/// The caller selects the frame region; an engine only ever sees
/// the already-cropped pixels.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, frame: &Frame) -> Result<OcrOutput, OcrError>;
}
