//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST path from the inbound layer together with
//! the schema wrappers in [`crate::inbound::http::schemas`]. Swagger UI serves
//! it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::payload::{
    MarkEntryPayload, MarksPayload, NewStudentPayload, StudentChangesPayload, SubjectPayload,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MarkSchema, MarksRecordedEnvelopeSchema, MarksRecordedSchema,
    MessageSchema, StudentDataSchema, StudentEnvelopeSchema, StudentListSchema,
    StudentMarkSchema, StudentMarksSchema, StudentSchema, SubjectDataSchema, SubjectListSchema,
    SubjectSchema,
};

/// OpenAPI document for the records API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "Students, subjects, and the marks recorded against them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::get_student_marks,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::marks::record_marks,
        crate::inbound::http::subjects::list_subjects,
        crate::inbound::http::subjects::create_subject,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StudentSchema,
        SubjectSchema,
        MarkSchema,
        StudentMarkSchema,
        MessageSchema,
        StudentListSchema,
        StudentDataSchema,
        StudentEnvelopeSchema,
        StudentMarksSchema,
        MarksRecordedSchema,
        MarksRecordedEnvelopeSchema,
        SubjectListSchema,
        SubjectDataSchema,
        NewStudentPayload,
        StudentChangesPayload,
        MarksPayload,
        MarkEntryPayload,
        SubjectPayload,
    )),
    tags(
        (name = "students", description = "Student records"),
        (name = "marks", description = "Marks per student and subject"),
        (name = "subjects", description = "Subject catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_record_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/student",
            "/api/student/{id}",
            "/api/student/{id}/marks",
            "/api/marks",
            "/api/subject",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn student_schema_exposes_parent_reference() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let student = schemas.get("Student").expect("Student schema");
        assert_object_schema_has_field(student, "parent_id");
    }
}
