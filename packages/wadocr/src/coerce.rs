//! Coercion of recognized text into the declared output type.

use crate::error::QcError;
use crate::region::OutputKind;

/// A scalar value produced from one text region.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Float(f64),
    Text(String),
    Bool(bool),
}

/// Strips `prefix` from the start and `suffix` from the end of the
/// recognized text, where present, and trims surrounding whitespace.
pub fn strip_affixes<'a>(text: &'a str, prefix: &str, suffix: &str) -> &'a str {
    let text = text.trim();
    let text = text.strip_prefix(prefix).unwrap_or(text);
    let text = text.strip_suffix(suffix).unwrap_or(text);
    text.trim()
}

/// Truthy/falsy vocabulary, case-insensitive. Matches the `strtobool`
/// vocabulary the original module relied on:
/// `1 y yes t true on` are true, `0 n no f false off` are false.
fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "t" | "true" | "on" => Some(true),
        "0" | "n" | "no" | "f" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Converts recognized text into the region's declared scalar type.
///
/// `Image` regions never reach this function; their result is the exported
/// crop, not the text.
pub fn coerce_text(
    region: &str,
    text: &str,
    kind: OutputKind,
    prefix: &str,
    suffix: &str,
) -> Result<CoercedValue, QcError> {
    let stripped = strip_affixes(text, prefix, suffix);
    match kind {
        OutputKind::Float => stripped
            .parse::<f64>()
            .map(CoercedValue::Float)
            .map_err(|_| QcError::Coercion {
                region: region.to_string(),
                reason: format!("{stripped:?} is not a float"),
            }),
        OutputKind::Text => Ok(CoercedValue::Text(stripped.to_string())),
        OutputKind::Bool => parse_bool(stripped)
            .map(CoercedValue::Bool)
            .ok_or_else(|| QcError::Coercion {
                region: region.to_string(),
                reason: format!("{stripped:?} is not in the boolean vocabulary"),
            }),
        OutputKind::Image => Err(QcError::Coercion {
            region: region.to_string(),
            reason: "object regions carry no text value".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_both_affixes() {
        assert_eq!(strip_affixes("Value: 3.14mm", "Value: ", "mm"), "3.14");
    }

    #[test]
    fn test_strip_absent_affixes_is_noop() {
        assert_eq!(strip_affixes("3.14", "Value: ", "mm"), "3.14");
    }

    #[test]
    fn test_float_coercion() {
        let v = coerce_text("Depth", "Value: 3.14mm", OutputKind::Float, "Value: ", "mm").unwrap();
        assert_eq!(v, CoercedValue::Float(3.14));
    }

    #[test]
    fn test_string_keeps_stripped_text() {
        let v = coerce_text("Depth", "Value: 3.14mm", OutputKind::Text, "Value: ", "mm").unwrap();
        assert_eq!(v, CoercedValue::Text("3.14".to_string()));
    }

    #[test]
    fn test_float_coercion_failure() {
        let err =
            coerce_text("Depth", "n/a", OutputKind::Float, "", "").unwrap_err();
        assert!(matches!(err, QcError::Coercion { .. }), "{err}");
    }

    #[test]
    fn test_bool_vocabulary() {
        for text in ["yes", "Y", "TRUE", "on", "1", "t"] {
            let v = coerce_text("Flag", text, OutputKind::Bool, "", "").unwrap();
            assert_eq!(v, CoercedValue::Bool(true), "truthy {text:?}");
        }
        for text in ["no", "N", "FALSE", "off", "0", "f"] {
            let v = coerce_text("Flag", text, OutputKind::Bool, "", "").unwrap();
            assert_eq!(v, CoercedValue::Bool(false), "falsy {text:?}");
        }
    }

    #[test]
    fn test_bool_outside_vocabulary_fails() {
        let err = coerce_text("Flag", "maybe", OutputKind::Bool, "", "").unwrap_err();
        assert!(matches!(err, QcError::Coercion { .. }), "{err}");
    }

    #[test]
    fn test_negative_and_integer_floats() {
        let v = coerce_text("Gain", "-12", OutputKind::Float, "", "").unwrap();
        assert_eq!(v, CoercedValue::Float(-12.0));
    }

    #[test]
    fn test_whitespace_trimmed_around_value() {
        let v = coerce_text("Depth", "  12.5cm \n", OutputKind::Float, "", "cm").unwrap();
        assert_eq!(v, CoercedValue::Float(12.5));
    }
}
