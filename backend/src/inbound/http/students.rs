//! Student API handlers.
//!
//! ```text
//! GET    /api/student
//! POST   /api/student {"name":"Ada","email":"ada@example.com","age":11}
//! GET    /api/student/{id}
//! GET    /api/student/{id}/marks
//! PUT    /api/student/{id} {"age":12}
//! DELETE /api/student/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::debug;

use crate::domain::{Error, NewStudent, StudentChanges, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{DataEnvelope, MessageEnvelope, StudentEnvelope};
use crate::inbound::http::payload::{NewStudentPayload, StudentChangesPayload};
use crate::inbound::http::schemas::{
    ErrorSchema, MessageSchema, StudentDataSchema, StudentEnvelopeSchema, StudentListSchema,
    StudentMarksSchema,
};
use crate::inbound::http::state::HttpState;

const STUDENT_NOT_FOUND: &str = "Student not found.";

/// Resolve a path id. Non-positive ids cannot name a stored row.
fn student_id(raw: i64, missing_message: &str) -> ApiResult<StudentId> {
    StudentId::new(raw).map_err(|_| {
        debug!(raw, "path id cannot match a student");
        Error::not_found(missing_message)
    })
}

/// List every student ordered by id.
#[utoipa::path(
    get,
    path = "/api/student",
    responses(
        (status = 200, description = "Students", body = StudentListSchema),
        (status = 404, description = "No students stored", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/student")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let students = state.students_query.list().await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new("Students fetched successfully", students)))
}

/// Register a student.
#[utoipa::path(
    post,
    path = "/api/student",
    request_body = NewStudentPayload,
    responses(
        (status = 201, description = "Student created", body = StudentEnvelopeSchema),
        (status = 400, description = "Missing or invalid fields, or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/student")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<NewStudentPayload>,
) -> ApiResult<HttpResponse> {
    let student = NewStudent::try_from(payload.into_inner())?;
    let created = state.students.create(student).await?;
    Ok(HttpResponse::Created().json(StudentEnvelope::new("Student added successfully", created)))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/student/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentDataSchema),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/student/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner(), "Student data not found.")?;
    let student = state.students_query.get(id).await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new(
        "Student data fetched successfully",
        student,
    )))
}

/// Fetch a student's marks joined with subject names.
#[utoipa::path(
    get,
    path = "/api/student/{id}/marks",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Marks with subjects", body = StudentMarksSchema),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "No marks recorded", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudentMarks"
)]
#[get("/student/{id}/marks")]
pub async fn get_student_marks(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner(), "No marks found for this student.")?;
    let marks = state.students_query.marks(id).await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new("Marks fetched successfully", marks)))
}

/// Apply a partial update to a student.
#[utoipa::path(
    put,
    path = "/api/student/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentChangesPayload,
    responses(
        (status = 200, description = "Student updated", body = StudentEnvelopeSchema),
        (status = 400, description = "Invalid fields, no changes, or repeated information", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/student/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<StudentChangesPayload>,
) -> ApiResult<HttpResponse> {
    let changes = StudentChanges::try_from(payload.into_inner())?;
    let id = student_id(path.into_inner(), STUDENT_NOT_FOUND)?;
    let updated = state.students.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(StudentEnvelope::new("Student updated successfully.", updated)))
}

/// Delete a student together with their marks.
#[utoipa::path(
    delete,
    path = "/api/student/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student and marks deleted", body = MessageSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/student/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner(), STUDENT_NOT_FOUND)?;
    state.students.delete(id).await?;
    Ok(HttpResponse::Ok().json(MessageEnvelope::new(
        "Student and their marks deleted successfully.",
    )))
}

#[cfg(test)]
mod tests;
