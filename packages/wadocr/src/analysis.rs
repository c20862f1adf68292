//! The two host-dispatched entry points: the OCR extraction pipeline
//! (`qc_series`) and the acquisition-timestamp reader (`acqdatetime`).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};
use wadocr_ocr::{Frame, OcrEngine};

use crate::coerce::{coerce_text, CoercedValue};
use crate::dicom::{self, SeriesFiles};
use crate::error::QcError;
use crate::region::{parse_regions, OutputKind};
use crate::results::ResultsSink;

/// Runs the OCR extraction pipeline over the first image of the series.
///
/// Every configured region is cropped from the frame (transposed x/y
/// convention), recognized by `engine`, coerced into its declared type and
/// written into the sink under the region's name. `object` regions skip the
/// text path: their crop is exported as `<name>.jpg` under `output_dir`.
///
/// The first failing region aborts the rest; entries already written stay
/// in the sink and the host decides what a partially-filled failed action
/// means.
pub fn run_qc_series(
    series: &SeriesFiles,
    params: &BTreeMap<String, String>,
    engine: &dyn OcrEngine,
    output_dir: &Path,
    sink: &mut ResultsSink,
) -> Result<(), QcError> {
    let input = series
        .first()
        .ok_or_else(|| QcError::Input("empty series file list".to_string()))?;
    let frame = dicom::load_frame(input)?;
    info!(
        input = %input.display(),
        rows = frame.rows(),
        cols = frame.cols(),
        "loaded series frame"
    );
    run_qc_frame(&frame, params, engine, output_dir, sink)
}

/// The extraction pipeline over an already-loaded frame. Split out of
/// [`run_qc_series`] so a host holding pixel data in memory can skip the
/// DICOM round-trip.
pub fn run_qc_frame(
    frame: &Frame,
    params: &BTreeMap<String, String>,
    engine: &dyn OcrEngine,
    output_dir: &Path,
    sink: &mut ResultsSink,
) -> Result<(), QcError> {
    let regions = parse_regions(params)?;
    if regions.is_empty() {
        warn!("qc_series action carries no OCR_ regions");
        return Ok(());
    }

    for (name, spec) in &regions {
        let crop = frame.crop(spec.rect.transposed())?;

        if spec.kind == OutputKind::Image {
            let path = output_dir.join(format!("{name}.jpg"));
            crop.to_gray_image()?.save(&path)?;
            debug!(region = %name, path = %path.display(), "exported region crop");
            sink.add_object(name, &path)?;
            continue;
        }

        let output = engine.recognize(&crop)?;
        debug!(
            region = %name,
            text = %output.text,
            confidence = ?output.mean_confidence,
            "recognized region"
        );
        match coerce_text(name, &output.text, spec.kind, &spec.prefix, &spec.suffix)? {
            CoercedValue::Float(v) => sink.add_float(name, v)?,
            CoercedValue::Text(v) => sink.add_string(name, &v)?,
            CoercedValue::Bool(v) => sink.add_bool(name, v)?,
        }
    }
    Ok(())
}

/// Reads the acquisition timestamp from the headers of the first series file
/// and writes it as the `AcquisitionDateTime` result. Pixel data is never
/// touched.
pub fn run_acqdatetime(series: &SeriesFiles, sink: &mut ResultsSink) -> Result<(), QcError> {
    let input = series
        .first()
        .ok_or_else(|| QcError::Input("empty series file list".to_string()))?;
    let headers = dicom::read_headers(input)?;
    let dt = dicom::acq_datetime(&headers)?;
    info!(input = %input.display(), datetime = %dt, "read acquisition timestamp");
    sink.add_datetime("AcquisitionDateTime", dt)?;
    Ok(())
}
