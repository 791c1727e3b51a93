//! Todo payload decoding and validation.
//!
//! Request bodies arrive as raw JSON. Only the writable fields (`title`,
//! `body`, `status`) are read; everything else a client sends, including
//! `id` and the server-managed timestamps, is ignored. Type problems and rule
//! violations are collected into one [`FieldErrors`] so the client sees every
//! problem at once.

use serde_json::{Map, Value};
use validator::Validate;

use crate::validation::{
    FieldErrors, MSG_NOT_INTEGER, MSG_NOT_NULL, MSG_NOT_STRING, MSG_REQUIRED, NON_FIELD_ERRORS,
};

/// Entity name used in not-found errors and log lines.
pub const ENTITY: &str = "Todo";

pub const FIELD_TITLE: &str = "title";
pub const FIELD_BODY: &str = "body";
pub const FIELD_STATUS: &str = "status";

/// Message reported when `status` is below zero.
pub const MSG_NEGATIVE_STATUS: &str = "Value cannot be negative";

/// Whether a payload must carry every writable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Create and full update: every writable field is required.
    Full,
    /// Partial update: only supplied fields are read.
    Partial,
}

/// Writable fields for a new todo. All are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub body: String,
    pub status: i32,
}

/// Writable fields for an update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub body: Option<String>,
    #[validate(range(min = 0, message = "Value cannot be negative"))]
    pub status: Option<i32>,
}

impl From<CreateTodo> for UpdateTodo {
    fn from(input: CreateTodo) -> Self {
        Self {
            title: Some(input.title),
            body: Some(input.body),
            status: Some(input.status),
        }
    }
}

impl TryFrom<UpdateTodo> for CreateTodo {
    type Error = FieldErrors;

    fn try_from(input: UpdateTodo) -> Result<Self, Self::Error> {
        match (input.title, input.body, input.status) {
            (Some(title), Some(body), Some(status)) => Ok(Self {
                title,
                body,
                status,
            }),
            (title, body, status) => {
                let mut errors = FieldErrors::new();
                if title.is_none() {
                    errors.add(FIELD_TITLE, MSG_REQUIRED);
                }
                if body.is_none() {
                    errors.add(FIELD_BODY, MSG_REQUIRED);
                }
                if status.is_none() {
                    errors.add(FIELD_STATUS, MSG_REQUIRED);
                }
                Err(errors)
            }
        }
    }
}

/// Decode a payload for a create operation.
pub fn decode_create(value: &Value) -> Result<CreateTodo, FieldErrors> {
    decode_update(value, PayloadMode::Full)?.try_into()
}

/// Decode a payload for a full or partial update.
///
/// In [`PayloadMode::Full`] every writable field must be present; the result
/// then has all fields set.
pub fn decode_update(value: &Value, mode: PayloadMode) -> Result<UpdateTodo, FieldErrors> {
    let object = as_object(value)?;
    let mut errors = FieldErrors::new();

    let title = read_string(object, FIELD_TITLE, &mut errors).take(FIELD_TITLE, mode, &mut errors);
    let body = read_string(object, FIELD_BODY, &mut errors).take(FIELD_BODY, mode, &mut errors);
    let status =
        read_integer(object, FIELD_STATUS, &mut errors).take(FIELD_STATUS, mode, &mut errors);

    let changes = UpdateTodo {
        title,
        body,
        status,
    };
    if let Err(failures) = changes.validate() {
        errors.merge(failures.into());
    }

    errors.into_result()?;
    Ok(changes)
}

/// Decode every element of a batch payload.
///
/// Returns the decoded records only if all elements are valid. Otherwise the
/// error vector is aligned with the input, with an empty entry for each
/// element that passed.
pub fn decode_batch(values: &[Value]) -> Result<Vec<CreateTodo>, Vec<FieldErrors>> {
    let mut records = Vec::with_capacity(values.len());
    let mut errors = Vec::with_capacity(values.len());
    let mut any_invalid = false;

    for value in values {
        match decode_create(value) {
            Ok(record) => {
                records.push(record);
                errors.push(FieldErrors::new());
            }
            Err(e) => {
                any_invalid = true;
                errors.push(e);
            }
        }
    }

    if any_invalid {
        Err(errors)
    } else {
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

/// Outcome of reading one field from the payload.
enum Slot<T> {
    Absent,
    Invalid,
    Present(T),
}

impl<T> Slot<T> {
    fn take(self, field: &str, mode: PayloadMode, errors: &mut FieldErrors) -> Option<T> {
        match self {
            Slot::Present(value) => Some(value),
            Slot::Invalid => None,
            Slot::Absent => {
                if mode == PayloadMode::Full {
                    errors.add(field, MSG_REQUIRED);
                }
                None
            }
        }
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    value.as_object().ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.add(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_kind(value)
            ),
        );
        errors
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a text field. Numbers are accepted and kept in their JSON spelling.
fn read_string(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Slot<String> {
    match object.get(field) {
        None => Slot::Absent,
        Some(Value::Null) => {
            errors.add(field, MSG_NOT_NULL);
            Slot::Invalid
        }
        Some(Value::String(s)) => Slot::Present(s.clone()),
        Some(Value::Number(n)) => Slot::Present(n.to_string()),
        Some(_) => {
            errors.add(field, MSG_NOT_STRING);
            Slot::Invalid
        }
    }
}

/// Read a 32-bit integer field. Integral floats and numeric strings are accepted.
fn read_integer(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Slot<i32> {
    let parsed = match object.get(field) {
        None => return Slot::Absent,
        Some(Value::Null) => {
            errors.add(field, MSG_NOT_NULL);
            return Slot::Invalid;
        }
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match parsed.and_then(|n| i32::try_from(n).ok()) {
        Some(n) => Slot::Present(n),
        None => {
            errors.add(field, MSG_NOT_INTEGER);
            Slot::Invalid
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
