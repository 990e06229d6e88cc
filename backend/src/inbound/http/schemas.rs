//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered under the
//! domain names via `#[schema(as = ...)]`.

#![expect(
    dead_code,
    reason = "Wrappers exist only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error payload.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Invalid email format.")]
    message: String,
    /// Request correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "5b0f3c1e-8a9d-4d2f-9b1a-0c3e5f7a9b2d")]
    trace_id: Option<String>,
    /// `{field, code}` for validation failures, `{error}` for internal ones.
    details: Option<serde_json::Value>,
}

/// A stored student.
#[derive(ToSchema)]
#[schema(as = Student)]
pub struct StudentSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = 11)]
    age: i32,
    parent_id: Option<i32>,
    registration_date: chrono::DateTime<chrono::Utc>,
    #[schema(rename = "createdAt")]
    created_at: chrono::DateTime<chrono::Utc>,
    #[schema(rename = "updatedAt")]
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// A catalogue subject.
#[derive(ToSchema)]
#[schema(as = Subject)]
pub struct SubjectSchema {
    #[schema(example = 2)]
    id: i32,
    #[schema(example = "Mathematics")]
    name: String,
}

/// A stored mark.
#[derive(ToSchema)]
#[schema(as = Mark)]
pub struct MarkSchema {
    id: i32,
    student_id: i32,
    subject_id: i32,
    #[schema(example = 87)]
    marks: i32,
    date: chrono::DateTime<chrono::Utc>,
}

/// A mark joined with its subject.
#[derive(ToSchema)]
#[schema(as = StudentMark)]
pub struct StudentMarkSchema {
    id: i32,
    student_id: i32,
    subject_id: i32,
    marks: i32,
    date: chrono::DateTime<chrono::Utc>,
    subject: SubjectSchema,
}

/// `{message}` envelope.
#[derive(ToSchema)]
#[schema(as = Message)]
pub struct MessageSchema {
    #[schema(example = "Student and their marks deleted successfully.")]
    message: String,
}

/// `{message, data: [student]}` envelope.
#[derive(ToSchema)]
#[schema(as = StudentList)]
pub struct StudentListSchema {
    message: String,
    data: Vec<StudentSchema>,
}

/// `{message, data: student}` envelope.
#[derive(ToSchema)]
#[schema(as = StudentData)]
pub struct StudentDataSchema {
    message: String,
    data: StudentSchema,
}

/// `{message, student}` envelope returned by create and update.
#[derive(ToSchema)]
#[schema(as = StudentEnvelope)]
pub struct StudentEnvelopeSchema {
    #[schema(example = "Student added successfully")]
    message: String,
    student: StudentSchema,
}

/// `{message, data: [mark + subject]}` envelope.
#[derive(ToSchema)]
#[schema(as = StudentMarks)]
pub struct StudentMarksSchema {
    message: String,
    data: Vec<StudentMarkSchema>,
}

/// Counts and rows written by a mark submission.
#[derive(ToSchema)]
#[schema(as = MarksRecorded)]
pub struct MarksRecordedSchema {
    created: usize,
    updated: usize,
    marks: Vec<MarkSchema>,
}

/// `{message, data: {created, updated, marks}}` envelope.
#[derive(ToSchema)]
#[schema(as = MarksRecordedEnvelope)]
pub struct MarksRecordedEnvelopeSchema {
    #[schema(example = "Marks recorded successfully for all subjects.")]
    message: String,
    data: MarksRecordedSchema,
}

/// `{message, data: [subject]}` envelope.
#[derive(ToSchema)]
#[schema(as = SubjectList)]
pub struct SubjectListSchema {
    message: String,
    data: Vec<SubjectSchema>,
}

/// `{message, data: subject}` envelope.
#[derive(ToSchema)]
#[schema(as = SubjectData)]
pub struct SubjectDataSchema {
    message: String,
    data: SubjectSchema,
}
