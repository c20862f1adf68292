//! Module configuration as supplied by the QC host: a JSON document mapping
//! action names to their flat string parameters.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::QcError;

/// One configured unit of work, dispatched by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// The complete module configuration.
///
/// ```json
/// {
///   "actions": {
///     "acqdatetime": { "params": {} },
///     "qc_series": {
///       "params": {
///         "OCR_Depth:xywh": "5;5;50;20",
///         "OCR_Depth:suffix": "cm",
///         "OCR_Depth:type": "float"
///       }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub actions: BTreeMap<String, Action>,
}

impl ModuleConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, QcError> {
        let text = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&text)
            .map_err(|e| QcError::Config(format!("{}: {e}", path.as_ref().display())))
    }
}
