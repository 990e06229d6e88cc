//! Student records and the validated inputs used to create or change them.
//!
//! Raw request fields are checked once, up front, and turned into the typed
//! values below. Services only ever see [`NewStudent`] and
//! [`StudentChanges`], so presence and format rules live in one place.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Maximum stored length of a student name.
pub const STUDENT_NAME_MAX: usize = 100;
/// Maximum stored length of an email address.
pub const EMAIL_MAX: usize = 255;

/// Validation errors raised while building student inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Name, email, or age was not supplied on creation.
    MissingRequiredFields,
    /// An update carried none of the editable fields.
    NoChanges,
    InvalidEmail,
    InvalidAge,
    NameTooLong { max: usize },
    EmailTooLong { max: usize },
    /// `parent_id` was supplied but is not an integer.
    InvalidParent,
    InvalidId,
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields => {
                write!(f, "Member name, email, and age are required.")
            }
            Self::NoChanges => write!(
                f,
                "No data provided to update. Please provide at least one field (name, email, age, or parent_id)."
            ),
            Self::InvalidEmail => write!(f, "Invalid email format."),
            Self::InvalidAge => write!(f, "Age must be a positive number."),
            Self::NameTooLong { max } => write!(f, "Name must be at most {max} characters."),
            Self::EmailTooLong { max } => write!(f, "Email must be at most {max} characters."),
            Self::InvalidParent => write!(f, "parent_id must be an integer."),
            Self::InvalidId => write!(f, "Student id must be a positive integer."),
        }
    }
}

impl std::error::Error for StudentValidationError {}

impl StudentValidationError {
    /// Offending request field, when a single one is to blame.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredFields | Self::NoChanges => None,
            Self::InvalidEmail | Self::EmailTooLong { .. } => Some("email"),
            Self::InvalidAge => Some("age"),
            Self::NameTooLong { .. } => Some("name"),
            Self::InvalidParent => Some("parent_id"),
            Self::InvalidId => Some("id"),
        }
    }

    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingRequiredFields => "missing_required_fields",
            Self::NoChanges => "no_changes",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidAge => "invalid_age",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidParent => "invalid_parent_id",
            Self::InvalidId => "invalid_id",
        }
    }
}

impl From<StudentValidationError> for Error {
    fn from(value: StudentValidationError) -> Self {
        let details = match value.field() {
            Some(field) => json!({ "field": field, "code": value.reason() }),
            None => json!({ "code": value.reason() }),
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Store-generated student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct StudentId(i32);

impl StudentId {
    /// Wrap a raw identifier; identifiers start at 1.
    pub fn new(raw: i64) -> Result<Self, StudentValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(StudentValidationError::InvalidId)
    }

    /// Raw value as stored in the database.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StudentId> for i32 {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// Non-empty student name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Validate a name. An empty string counts as "not supplied".
    pub fn new(name: impl Into<String>) -> Result<Self, StudentValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StudentValidationError::MissingRequiredFields);
        }
        if name.chars().count() > STUDENT_NAME_MAX {
            return Err(StudentValidationError::NameTooLong {
                max: STUDENT_NAME_MAX,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<StudentName> for String {
    fn from(value: StudentName) -> Self {
        value.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: something, an @, something, a dot, something.
        Regex::new(r"\S+@\S+\.\S+")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address matching the loose `local@domain.tld` shape.
///
/// # Examples
/// ```
/// use records_backend::domain::EmailAddress;
///
/// assert!(EmailAddress::new("ada@example.com").is_ok());
/// assert!(EmailAddress::new("ada.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, StudentValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(StudentValidationError::InvalidEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(StudentValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Positive age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Age(i32);

impl Age {
    pub fn new(raw: i64) -> Result<Self, StudentValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(StudentValidationError::InvalidAge)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<Age> for i32 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<i32> for Age {
    type Error = StudentValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// Parent reference; never checked against existing students. Zero means
/// "no parent".
fn parent_from_raw(raw: i64) -> Result<Option<i32>, StudentValidationError> {
    i32::try_from(raw)
        .map(|value| (value != 0).then_some(value))
        .map_err(|_| StudentValidationError::InvalidParent)
}

/// A persisted student.
///
/// Serialises with the column names the records UI reads (`parent_id`,
/// `registration_date`) plus `createdAt`/`updatedAt` bookkeeping stamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: StudentName,
    pub email: EmailAddress,
    pub age: Age,
    pub parent_id: Option<i32>,
    pub registration_date: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: StudentName,
    pub email: EmailAddress,
    pub age: Age,
    pub parent_id: Option<i32>,
}

impl NewStudent {
    /// Build creation input from raw request parts.
    ///
    /// A missing or empty name or email, or a missing age, fails with
    /// [`StudentValidationError::MissingRequiredFields`] before any format
    /// check runs. A zero `parent_id` is treated as "no parent".
    ///
    /// # Examples
    /// ```
    /// use records_backend::domain::{NewStudent, StudentValidationError};
    ///
    /// let student = NewStudent::try_from_parts(
    ///     Some("Ada".into()),
    ///     Some("ada@example.com".into()),
    ///     Some(10),
    ///     None,
    /// )
    /// .expect("valid input");
    /// assert_eq!(student.age.as_i32(), 10);
    ///
    /// let missing = NewStudent::try_from_parts(Some("Ada".into()), None, Some(10), None);
    /// assert_eq!(missing, Err(StudentValidationError::MissingRequiredFields));
    /// ```
    pub fn try_from_parts(
        name: Option<String>,
        email: Option<String>,
        age: Option<i64>,
        parent_id: Option<i64>,
    ) -> Result<Self, StudentValidationError> {
        let (Some(name), Some(email), Some(age)) = (
            name.filter(|value| !value.is_empty()),
            email.filter(|value| !value.is_empty()),
            age,
        ) else {
            return Err(StudentValidationError::MissingRequiredFields);
        };

        let email = EmailAddress::new(email)?;
        let name = StudentName::new(name)?;
        let age = Age::new(age)?;
        let parent_id = parent_id.map(parent_from_raw).transpose()?.flatten();
        Ok(Self {
            name,
            email,
            age,
            parent_id,
        })
    }
}

/// Validated partial update for a student.
///
/// `parent_id` distinguishes "not supplied" (`None`) from "clear the parent"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<StudentName>,
    pub email: Option<EmailAddress>,
    pub age: Option<Age>,
    pub parent_id: Option<Option<i32>>,
}

impl StudentChanges {
    /// Build an update from raw request parts.
    ///
    /// Empty names and emails count as absent. At least one field must remain.
    pub fn try_from_parts(
        name: Option<String>,
        email: Option<String>,
        age: Option<i64>,
        parent_id: Option<Option<i64>>,
    ) -> Result<Self, StudentValidationError> {
        let name = name.filter(|value| !value.is_empty());
        let email = email.filter(|value| !value.is_empty());
        if name.is_none() && email.is_none() && age.is_none() && parent_id.is_none() {
            return Err(StudentValidationError::NoChanges);
        }

        let email = email.map(EmailAddress::new).transpose()?;
        let age = age.map(Age::new).transpose()?;
        let name = name.map(StudentName::new).transpose()?;
        let parent_id = parent_id
            .map(|raw| raw.map(parent_from_raw).transpose().map(Option::flatten))
            .transpose()?;
        Ok(Self {
            name,
            email,
            age,
            parent_id,
        })
    }

    /// True when name, email, and age are all supplied and equal `current`.
    ///
    /// `parent_id` is not part of the comparison, so a request repeating the
    /// other three fields while changing only the parent is still treated as
    /// carrying no new information.
    pub fn repeats(&self, current: &Student) -> bool {
        matches!(
            (&self.name, &self.email, self.age),
            (Some(name), Some(email), Some(age))
                if *name == current.name && *email == current.email && age == current.age
        )
    }

    /// Resolve the changes against the stored record.
    pub fn apply_to(&self, current: &Student) -> StudentUpdate {
        StudentUpdate {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            age: self.age.unwrap_or(current.age),
            parent_id: self.parent_id.unwrap_or(current.parent_id),
        }
    }
}

/// Fully resolved column values written by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: StudentName,
    pub email: EmailAddress,
    pub age: Age,
    pub parent_id: Option<i32>,
}
