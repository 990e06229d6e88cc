//! Request bodies accepted by the records API.
//!
//! The records UI posts form values, so numeric fields arrive either as JSON
//! numbers or as strings. Bodies are decoded leniently here and then handed to
//! the domain constructors, which own every validation rule.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    MarkEntryInput, MarkSubmission, MarkValidationError, NewStudent, StudentChanges,
    StudentValidationError, SubjectName, SubjectValidationError,
};

/// A JSON member that may be absent, explicitly `null`, or present.
///
/// Use together with `#[serde(default)]` so a missing key decodes to
/// [`Field::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Field<T> {
    /// Collapse "absent" and "null" into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Null, Self::Present))
    }
}

/// Integer-like value sent either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Largest magnitude at which every `f64` integer is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_991.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is integral and within the exactly representable range"
)]
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT)
        .then_some(value as i64)
}

impl NumberOrText {
    /// Interpret the value as an integer.
    ///
    /// Returns `Ok(None)` for blank text and `Err(())` when the value is not
    /// an integer.
    fn to_integer(&self) -> Result<Option<i64>, ()> {
        match self {
            Self::Int(value) => Ok(Some(*value)),
            Self::Float(value) => integral(*value).map(Some).ok_or(()),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
                    .map(Some)
                    .ok_or(())
            }
        }
    }
}

fn lenient_integer(
    field: Field<NumberOrText>,
    invalid: StudentValidationError,
) -> Result<Option<i64>, StudentValidationError> {
    match field {
        Field::Present(value) => value.to_integer().map_err(|()| invalid),
        Field::Absent | Field::Null => Ok(None),
    }
}

/// Body of `POST /api/student`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewStudentPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Field<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub email: Field<String>,
    /// Positive integer, as a number or numeric string.
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 11)]
    pub age: Field<NumberOrText>,
    /// Optional parent reference; empty string or `null` means none.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Field<NumberOrText>,
}

impl TryFrom<NewStudentPayload> for NewStudent {
    type Error = StudentValidationError;

    fn try_from(payload: NewStudentPayload) -> Result<Self, Self::Error> {
        let age = lenient_integer(payload.age, StudentValidationError::InvalidAge)?;
        let parent_id = lenient_integer(payload.parent_id, StudentValidationError::InvalidParent)?;
        Self::try_from_parts(
            payload.name.into_option(),
            payload.email.into_option(),
            age,
            parent_id,
        )
    }
}

/// Body of `PUT /api/student/{id}`.
///
/// Every member is optional; an explicit `null` or empty `parent_id` clears
/// the parent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StudentChangesPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Field<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Field<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub age: Field<NumberOrText>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Field<NumberOrText>,
}

impl TryFrom<StudentChangesPayload> for StudentChanges {
    type Error = StudentValidationError;

    fn try_from(payload: StudentChangesPayload) -> Result<Self, Self::Error> {
        // A supplied age must be a number; `null` or blank text is not
        // "absent" here.
        let age = match payload.age {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Present(value) => Some(
                value
                    .to_integer()
                    .map_err(|()| StudentValidationError::InvalidAge)?,
            ),
        };
        let blank_age = matches!(age, Some(None));
        let parent_id = match payload.parent_id {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Present(value) => Some(
                value
                    .to_integer()
                    .map_err(|()| StudentValidationError::InvalidParent)?,
            ),
        };
        let changes = Self::try_from_parts(
            payload.name.into_option(),
            payload.email.into_option(),
            age.flatten(),
            parent_id,
        )?;
        if blank_age {
            return Err(StudentValidationError::InvalidAge);
        }
        Ok(changes)
    }
}

/// One element of `marksList`, documented for OpenAPI only.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MarkEntryPayload {
    #[schema(example = 2)]
    subject_id: i64,
    /// Non-negative integer score.
    #[schema(example = 87)]
    marks: i64,
}

/// Body of `POST /api/marks`.
///
/// `marksList` is kept as raw JSON so a malformed element can be reported by
/// its index instead of failing the whole body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarksPayload {
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 1)]
    pub student_id: Field<NumberOrText>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<MarkEntryPayload>>)]
    pub marks_list: Option<Value>,
}

fn subject_id_of(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn entry_of(value: &Value) -> MarkEntryInput {
    let Some(object) = value.as_object() else {
        return MarkEntryInput::default();
    };
    MarkEntryInput {
        subject_id: subject_id_of(object.get("subjectId")),
        marks: object.get("marks").and_then(Value::as_f64),
    }
}

impl TryFrom<MarksPayload> for MarkSubmission {
    type Error = MarkValidationError;

    fn try_from(payload: MarksPayload) -> Result<Self, Self::Error> {
        let student_id = match payload.student_id {
            Field::Present(value) => value
                .to_integer()
                .map_err(|()| MarkValidationError::MissingStudentId)?,
            Field::Absent | Field::Null => None,
        };
        let entries = match payload.marks_list {
            Some(Value::Array(items)) => Some(items.iter().map(entry_of).collect()),
            _ => None,
        };
        Self::try_new(student_id, entries)
    }
}

/// Body of `POST /api/subject`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubjectPayload {
    #[serde(default)]
    #[schema(example = "Mathematics")]
    pub name: Option<String>,
}

impl TryFrom<SubjectPayload> for SubjectName {
    type Error = SubjectValidationError;

    fn try_from(payload: SubjectPayload) -> Result<Self, Self::Error> {
        Self::new(payload.name.unwrap_or_default())
    }
}
