//! Subjects marks are recorded against.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Maximum stored length of a subject name.
pub const SUBJECT_NAME_MAX: usize = 100;

/// Validation errors for subject inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectValidationError {
    #[error("Subject name is required.")]
    EmptyName,
    #[error("Subject name must be at most {max} characters.")]
    NameTooLong { max: usize },
    #[error("Subject id must be a positive integer.")]
    InvalidId,
}

impl From<SubjectValidationError> for Error {
    fn from(value: SubjectValidationError) -> Self {
        let field = match value {
            SubjectValidationError::InvalidId => "id",
            SubjectValidationError::EmptyName | SubjectValidationError::NameTooLong { .. } => "name",
        };
        Error::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Store-generated subject identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SubjectId(i32);

impl SubjectId {
    pub fn new(raw: i64) -> Result<Self, SubjectValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(SubjectValidationError::InvalidId)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SubjectId> for i32 {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for SubjectId {
    type Error = SubjectValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// Trimmed, non-empty subject name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectName(String);

impl SubjectName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, SubjectValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SubjectValidationError::EmptyName);
        }
        if trimmed.chars().count() > SUBJECT_NAME_MAX {
            return Err(SubjectValidationError::NameTooLong {
                max: SUBJECT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SubjectName> for String {
    fn from(value: SubjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SubjectName {
    type Error = SubjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: SubjectName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Maths ", Ok("Maths"))]
    #[case("   ", Err(SubjectValidationError::EmptyName))]
    fn names_are_trimmed(
        #[case] raw: &str,
        #[case] expected: Result<&str, SubjectValidationError>,
    ) {
        let result = SubjectName::new(raw);
        assert_eq!(result.as_ref().map(SubjectName::as_str), expected.as_ref().map(|s| *s));
    }

    #[rstest]
    fn names_have_a_length_ceiling() {
        let raw = "x".repeat(SUBJECT_NAME_MAX + 1);
        assert_eq!(
            SubjectName::new(raw),
            Err(SubjectValidationError::NameTooLong {
                max: SUBJECT_NAME_MAX
            })
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MAX)]
    fn ids_must_fit_and_be_positive(#[case] raw: i64) {
        assert_eq!(SubjectId::new(raw), Err(SubjectValidationError::InvalidId));
    }
}
