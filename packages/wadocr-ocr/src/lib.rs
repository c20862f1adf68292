pub mod engine;
pub mod frame;

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;

pub use engine::{OcrEngine, OcrError, OcrOutput};
pub use frame::{Frame, FrameError, Rect};

#[cfg(feature = "engine-tesseract")]
pub use tesseract::TesseractEngine;
