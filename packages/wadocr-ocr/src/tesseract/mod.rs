use leptess::{LepTess, Variable};

use crate::engine::{OcrEngine, OcrError, OcrOutput};
use crate::frame::Frame;

/// Tesseract-backed recognition via `leptess`.
///
/// A fresh Tesseract handle is created per call; `LepTess` is not `Sync`
/// and region crops are small enough that init cost is irrelevant here.
pub struct TesseractEngine {
    language: String,
    datapath: Option<String>,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self::with_language("eng")
    }

    pub fn with_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            datapath: None,
        }
    }

    /// Points Tesseract at a non-default `tessdata` directory.
    pub fn with_datapath(mut self, datapath: &str) -> Self {
        self.datapath = Some(datapath.to_string());
        self
    }

    fn init(&self) -> Result<LepTess, OcrError> {
        LepTess::new(self.datapath.as_deref(), &self.language)
            .map_err(|e| OcrError::EngineError(format!("tesseract init: {e}")))
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, frame: &Frame) -> Result<OcrOutput, OcrError> {
        let png = frame.to_png()?;
        let mut tess = self.init()?;
        // Region crops hold a single line of annotation text.
        tess.set_variable(Variable::TesseditPagesegMode, "7")
            .map_err(|e| OcrError::EngineError(format!("tesseract variable: {e}")))?;
        tess.set_image_from_mem(&png)
            .map_err(|e| OcrError::InvalidInput(format!("tesseract image: {e}")))?;
        tess.set_source_resolution(70);
        let text = tess
            .get_utf8_text()
            .map_err(|e| OcrError::EngineError(format!("tesseract text: {e}")))?;
        let conf = tess.mean_text_conf();
        Ok(OcrOutput {
            text: text.trim_end().to_string(),
            mean_confidence: (conf >= 0).then_some(conf as f32),
        })
    }
}
