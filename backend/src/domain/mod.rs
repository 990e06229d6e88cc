//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed student, subject, and mark records,
//! the validation that turns raw request fields into them, and the services
//! that enforce the record-keeping rules through repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.
//! - Student, Subject, Mark and their validated inputs.
//! - StudentService, MarksService, SubjectService: driving port
//!   implementations.

pub mod error;
pub mod mark;
mod marks_service;
pub mod ports;
pub mod student;
mod student_service;
pub mod subject;
mod subject_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::mark::{
    Mark, MarkEntry, MarkEntryInput, MarkSubject, MarkSubmission, MarkValidationError, Score,
    StudentMark, UpsertOutcome,
};
pub use self::marks_service::MarksService;
pub use self::student::{
    Age, EmailAddress, NewStudent, Student, StudentChanges, StudentId, StudentName,
    StudentUpdate, StudentValidationError,
};
pub use self::student_service::StudentService;
pub use self::subject::{Subject, SubjectId, SubjectName, SubjectValidationError};
pub use self::subject_service::SubjectService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use records_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Student not found."))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
