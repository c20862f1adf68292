//! Region descriptor parsing.
//!
//! The host hands the module a flat string map; keys of the form
//! `OCR_<RegionName>:<field>` describe one region each. Every region must end
//! up with a rectangle and a recognized output type before OCR runs; partial
//! or misspelled declarations are rejected here rather than surfacing later
//! as a missing result.

use std::collections::BTreeMap;
use std::str::FromStr;

use wadocr_ocr::Rect;

use crate::error::QcError;

/// Declared output type of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Recognized text parsed as a floating-point number (`float`).
    Float,
    /// Recognized text written as-is (`string`).
    Text,
    /// Recognized text mapped through the boolean vocabulary (`bool`).
    Bool,
    /// No text coercion: the cropped sub-image is exported (`object`).
    Image,
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Self::Float),
            "string" => Ok(Self::Text),
            "bool" => Ok(Self::Bool),
            "object" => Ok(Self::Image),
            other => Err(format!(
                "unrecognized type {other:?}, expected float|string|bool|object"
            )),
        }
    }
}

/// One fully-validated region descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    /// Rectangle as configured, in the upstream plotting convention
    /// (x/w run along image rows). Transposed at crop time.
    pub rect: Rect,
    pub prefix: String,
    pub suffix: String,
    pub kind: OutputKind,
}

#[derive(Default)]
struct PartialRegion {
    rect: Option<Rect>,
    prefix: String,
    suffix: String,
    kind: Option<OutputKind>,
}

fn parse_xywh(name: &str, value: &str) -> Result<Rect, QcError> {
    let parts: Vec<&str> = value.split(';').collect();
    if parts.len() != 4 {
        return Err(QcError::Config(format!(
            "region {name}: xywh needs 4 values, got {} in {value:?}",
            parts.len()
        )));
    }
    let mut nums = [0u32; 4];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|_| {
            QcError::Config(format!(
                "region {name}: non-numeric xywh component {part:?} in {value:?}"
            ))
        })?;
    }
    Ok(Rect::new(nums[0], nums[1], nums[2], nums[3]))
}

/// Collects all `OCR_`-prefixed params into validated region descriptors.
/// Keys without the prefix are ignored; everything else must parse.
/// The returned map is keyed by the bare region name (prefix dropped),
/// which is also the name the region's result is written under.
pub fn parse_regions(
    params: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, RegionSpec>, QcError> {
    let mut partial: BTreeMap<String, PartialRegion> = BTreeMap::new();

    for (key, value) in params {
        let Some(rest) = key.strip_prefix("OCR_") else {
            continue;
        };
        let (name, field) = rest.split_once(':').ok_or_else(|| {
            QcError::Config(format!("key {key:?} has no :<field> part"))
        })?;
        let region = partial.entry(name.to_string()).or_default();
        match field {
            "xywh" => region.rect = Some(parse_xywh(name, value)?),
            "prefix" => region.prefix = value.clone(),
            "suffix" => region.suffix = value.clone(),
            "type" => {
                region.kind = Some(value.parse().map_err(|e| {
                    QcError::Config(format!("region {name}: {e}"))
                })?);
            }
            other => {
                return Err(QcError::Config(format!(
                    "region {name}: unknown field {other:?}"
                )));
            }
        }
    }

    let mut regions = BTreeMap::new();
    for (name, region) in partial {
        let rect = region
            .rect
            .ok_or_else(|| QcError::Config(format!("region {name}: missing xywh")))?;
        let kind = region
            .kind
            .ok_or_else(|| QcError::Config(format!("region {name}: missing type")))?;
        regions.insert(
            name,
            RegionSpec {
                rect,
                prefix: region.prefix,
                suffix: region.suffix,
                kind,
            },
        );
    }
    Ok(regions)
}
