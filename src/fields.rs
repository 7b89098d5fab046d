//! Typed field readers for self-describing JSON envelopes.
//!
//! Every value in a config document is wrapped in an envelope of the form
//! `{ "type": "<tag>", ...payload }`. A reader checks the envelope tag and the
//! payload keys for one semantic type and extracts the value.
//!
//! | Reader        | Tag      | Payload                               |
//! |---------------|----------|---------------------------------------|
//! | [`read_int`]    | `int`    | `value` (number)                      |
//! | [`read_double`] | `double` | `value` (number)                      |
//! | [`read_vec2`]   | `Vec2`   | `x`, `y` (numbers)                    |
//! | [`read_color`]  | `ColorF` | `r`, `g`, `b` (numbers), optional `a` |
//! | [`read_string`] | `String` | `value` (string)                      |
//! | [`read_bool`]   | `bool`   | `value` (boolean)                     |
//!
//! Readers are pure. Reporting failures to a user is the caller's job.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{ColorF, Vec2};

pub const INT_TAG: &str = "int";
pub const DOUBLE_TAG: &str = "double";
pub const VEC2_TAG: &str = "Vec2";
pub const COLOR_TAG: &str = "ColorF";
pub const STRING_TAG: &str = "String";
pub const BOOL_TAG: &str = "bool";

/// Why a single field could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field is absent")]
    Missing,

    #[error("field is not an envelope object")]
    NotAnEnvelope,

    #[error("envelope has no string \"type\"")]
    MissingTypeTag,

    #[error("envelope type is `{found}`, expected `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("envelope key `{key}` is absent")]
    MissingKey { key: &'static str },

    #[error("envelope key `{key}` is not a {expected}")]
    WrongKind {
        key: &'static str,
        expected: &'static str,
    },
}

/// A named field that failed to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub error: FieldError,
}

/// A document was rejected by the parser of its data type.
///
/// Lists every required field that failed, not just the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{data_type}` rejected: {}", describe(.failures))]
pub struct ParseError {
    pub data_type: &'static str,
    pub failures: Vec<FieldFailure>,
}

fn describe(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.field, f.error))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseError {
    /// Names of the fields that failed, in the order they were read.
    pub fn failed_fields(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.field.as_str()).collect()
    }

    /// The failure recorded for `field`, if any.
    pub fn failure(&self, field: &str) -> Option<&FieldError> {
        self.failures
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.error)
    }
}

/// Locate `field` in `document` and check that it is an envelope tagged `tag`.
fn envelope<'a>(
    document: &'a Value,
    field: &str,
    tag: &'static str,
) -> Result<&'a Map<String, Value>, FieldError> {
    let object = document
        .get(field)
        .ok_or(FieldError::Missing)?
        .as_object()
        .ok_or(FieldError::NotAnEnvelope)?;

    let found = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FieldError::MissingTypeTag)?;

    if found != tag {
        return Err(FieldError::TypeMismatch {
            expected: tag,
            found: found.to_string(),
        });
    }

    Ok(object)
}

fn payload<'a>(envelope: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, FieldError> {
    envelope.get(key).ok_or(FieldError::MissingKey { key })
}

fn number(envelope: &Map<String, Value>, key: &'static str) -> Result<f64, FieldError> {
    payload(envelope, key)?.as_f64().ok_or(FieldError::WrongKind {
        key,
        expected: "number",
    })
}

/// Read an `int` envelope. Fractional numbers truncate toward zero.
pub fn read_int(document: &Value, field: &str) -> Result<i64, FieldError> {
    let envelope = envelope(document, field, INT_TAG)?;
    let value = payload(envelope, "value")?;

    if let Some(whole) = value.as_i64() {
        return Ok(whole);
    }

    value
        .as_f64()
        .map(|n| n.trunc() as i64)
        .ok_or(FieldError::WrongKind {
            key: "value",
            expected: "number",
        })
}

/// Read a `double` envelope.
pub fn read_double(document: &Value, field: &str) -> Result<f64, FieldError> {
    let envelope = envelope(document, field, DOUBLE_TAG)?;
    number(envelope, "value")
}

/// Read a `Vec2` envelope.
pub fn read_vec2(document: &Value, field: &str) -> Result<Vec2, FieldError> {
    let envelope = envelope(document, field, VEC2_TAG)?;
    Ok(Vec2::new(number(envelope, "x")?, number(envelope, "y")?))
}

/// Read a `ColorF` envelope.
///
/// Alpha is optional and defaults to fully opaque. A non-numeric `a` is
/// ignored rather than rejected.
pub fn read_color(document: &Value, field: &str) -> Result<ColorF, FieldError> {
    let envelope = envelope(document, field, COLOR_TAG)?;
    let r = number(envelope, "r")?;
    let g = number(envelope, "g")?;
    let b = number(envelope, "b")?;
    let a = envelope.get("a").and_then(Value::as_f64).unwrap_or(1.0);
    Ok(ColorF::new(r, g, b, a))
}

/// Read a `String` envelope.
pub fn read_string(document: &Value, field: &str) -> Result<String, FieldError> {
    let envelope = envelope(document, field, STRING_TAG)?;
    payload(envelope, "value")?
        .as_str()
        .map(str::to_owned)
        .ok_or(FieldError::WrongKind {
            key: "value",
            expected: "string",
        })
}

/// Read a `bool` envelope. An explicit `false` is a value, not an absence.
pub fn read_bool(document: &Value, field: &str) -> Result<bool, FieldError> {
    let envelope = envelope(document, field, BOOL_TAG)?;
    payload(envelope, "value")?
        .as_bool()
        .ok_or(FieldError::WrongKind {
            key: "value",
            expected: "boolean",
        })
}

/// Reads required fields of one document and remembers every failure.
///
/// ```ignore
/// let mut fields = FieldCollector::new(doc, "circleObject");
/// let center = fields.read("center", read_vec2);
/// let radius = fields.read("radius", read_double);
/// match (center, radius) {
///     (Some(center), Some(radius)) => Ok(CircleObject { center, radius }),
///     _ => Err(fields.into_error()),
/// }
/// ```
pub struct FieldCollector<'a> {
    document: &'a Value,
    data_type: &'static str,
    failures: Vec<FieldFailure>,
}

impl<'a> FieldCollector<'a> {
    pub fn new(document: &'a Value, data_type: &'static str) -> Self {
        Self {
            document,
            data_type,
            failures: Vec::new(),
        }
    }

    /// Read `field` with `reader`, recording the failure if it does not parse.
    pub fn read<T>(
        &mut self,
        field: &str,
        reader: fn(&Value, &str) -> Result<T, FieldError>,
    ) -> Option<T> {
        match reader(self.document, field) {
            Ok(value) => Some(value),
            Err(error) => {
                self.failures.push(FieldFailure {
                    field: field.to_string(),
                    error,
                });
                None
            }
        }
    }

    pub fn into_error(self) -> ParseError {
        ParseError {
            data_type: self.data_type,
            failures: self.failures,
        }
    }
}
