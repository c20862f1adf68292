//! DICOM access: series enumeration, header-only reads, pixel-frame loading
//! and acquisition-timestamp extraction.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::{DefaultDicomObject, InMemDicomObject, OpenFileOptions};
use dicom_pixeldata::PixelDecoder;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::QcError;
use wadocr_ocr::Frame;

/// Ordered file list of one image series.
pub type SeriesFiles = Vec<PathBuf>;

/// Enumerates the files of a study directory as one series, sorted by
/// file name. Subdirectories and hidden files are skipped.
pub fn series_filelist(dir: impl AsRef<Path>) -> Result<SeriesFiles, QcError> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(QcError::Input(format!(
            "no series files found in {}",
            dir.display()
        )));
    }
    Ok(files)
}

/// Opens a DICOM file reading headers only, stopping before PixelData.
pub fn read_headers(path: impl AsRef<Path>) -> Result<DefaultDicomObject, QcError> {
    let obj = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(path.as_ref())?;
    Ok(obj)
}

/// Loads the first frame of a DICOM file as an 8-bit grayscale [`Frame`].
///
/// Pixel data is decoded through the modality/VOI transforms of the
/// `dicom-pixeldata` crate; wider-than-8-bit and color data are reduced to
/// 8-bit luma.
pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame, QcError> {
    let obj = dicom_object::open_file(path.as_ref())?;
    let decoded = obj.decode_pixel_data()?;
    debug!(
        rows = decoded.rows(),
        cols = decoded.columns(),
        frames = decoded.number_of_frames(),
        "decoded pixel data"
    );
    let img = decoded.to_dynamic_image(0)?.to_luma8();
    let (w, h) = (img.width(), img.height());
    Frame::new(h, w, img.into_raw()).map_err(QcError::Bounds)
}

fn str_value(obj: &InMemDicomObject, tag: Tag) -> Option<String> {
    let value = obj.element(tag).ok()?.to_str().ok()?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Parses a DICOM DA value (`YYYYMMDD`).
fn parse_da(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok()
}

/// Parses a DICOM TM value (`HH[MM[SS[.frac]]]`).
fn parse_tm(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let (main, frac) = match s.split_once('.') {
        Some((m, f)) => (m, f),
        None => (s, ""),
    };
    if !main.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = main.get(0..2)?.parse().ok()?;
    let minute: u32 = match main.get(2..4) {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    let second: u32 = match main.get(4..6) {
        Some(sec) => sec.parse().ok()?,
        None => 0,
    };
    let micros: u32 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<6}");
        padded.get(0..6)?.parse().ok()?
    };
    NaiveTime::from_hms_micro_opt(hour, minute, second, micros)
}

/// Parses a DICOM DT value (`YYYYMMDD[HH[MM[SS[.frac]]]][&ZZXX]`),
/// discarding any timezone offset suffix.
fn parse_dt(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    // The offset suffix starts with + or -; dates themselves are all digits.
    let body = match s.find(['+', '-']) {
        Some(idx) => &s[..idx],
        None => s,
    };
    if body.len() < 8 {
        return None;
    }
    let date = parse_da(body.get(0..8)?)?;
    let rest = &body[8..];
    let time = if rest.is_empty() {
        NaiveTime::from_hms_opt(0, 0, 0)?
    } else {
        parse_tm(rest)?
    };
    Some(date.and_time(time))
}

/// Extracts the acquisition timestamp from image headers.
///
/// AcquisitionDateTime is preferred; AcquisitionDate + AcquisitionTime and
/// ContentDate + ContentTime are the fallbacks. A date without a matching
/// time yields midnight.
pub fn acq_datetime(obj: &InMemDicomObject) -> Result<NaiveDateTime, QcError> {
    if let Some(dt) = str_value(obj, tags::ACQUISITION_DATE_TIME) {
        return parse_dt(&dt)
            .ok_or_else(|| QcError::Header(format!("malformed AcquisitionDateTime {dt:?}")));
    }

    let pairs = [
        (tags::ACQUISITION_DATE, tags::ACQUISITION_TIME),
        (tags::CONTENT_DATE, tags::CONTENT_TIME),
    ];
    for (date_tag, time_tag) in pairs {
        if let Some(da) = str_value(obj, date_tag) {
            let date = parse_da(&da)
                .ok_or_else(|| QcError::Header(format!("malformed date {da:?}")))?;
            let time = match str_value(obj, time_tag) {
                Some(tm) => parse_tm(&tm)
                    .ok_or_else(|| QcError::Header(format!("malformed time {tm:?}")))?,
                None => NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            };
            return Ok(date.and_time(time));
        }
    }

    Err(QcError::Header(
        "no acquisition timestamp in headers".to_string(),
    ))
}
