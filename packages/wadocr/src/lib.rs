//! # wadocr
//!
//! A WAD-QC analysis module that extracts machine-readable values from fixed
//! pixel regions of a medical image using optical character recognition.
//!
//! The host configures named rectangular regions through flat key-value
//! parameters (`OCR_<RegionName>:<field>`); each region declares a rectangle,
//! an optional prefix/suffix to strip from the recognized text, and the output
//! type the text is coerced into (`float`, `string`, `bool`, or `object` for
//! a cropped sub-image export). Results are collected in a write-once-per-name
//! sink and persisted as a single JSON document.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::path::Path;
//! use wadocr::prelude::*;
//! use wadocr_ocr::TesseractEngine;
//!
//! let config = ModuleConfig::from_file("config.json")?;
//! let series = series_filelist("study_dir")?;
//! let mut sink = ResultsSink::new();
//! let engine = TesseractEngine::new();
//!
//! for (name, action) in &config.actions {
//!     match name.as_str() {
//!         "acqdatetime" => run_acqdatetime(&series, &mut sink)?,
//!         "qc_series" => {
//!             run_qc_series(&series, &action.params, &engine, Path::new("."), &mut sink)?
//!         }
//!         other => anyhow::bail!("unknown action {other}"),
//!     }
//! }
//! sink.write("results.json")?;
//! ```

pub mod analysis;
pub mod coerce;
pub mod config;
pub mod dicom;
pub mod error;
pub mod region;
pub mod results;

pub use analysis::{run_acqdatetime, run_qc_frame, run_qc_series};
pub use coerce::{coerce_text, strip_affixes, CoercedValue};
pub use config::{Action, ModuleConfig};
pub use dicom::{series_filelist, SeriesFiles};
pub use error::QcError;
pub use region::{parse_regions, OutputKind, RegionSpec};
pub use results::{ResultEntry, ResultsSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        coerce_text, parse_regions, run_acqdatetime, run_qc_frame, run_qc_series, series_filelist,
        Action,
        CoercedValue, ModuleConfig, OutputKind, QcError, RegionSpec, ResultEntry, ResultsSink,
    };
}
