//! Subject catalogue handlers.
//!
//! ```text
//! GET  /api/subject
//! POST /api/subject {"name":"Mathematics"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::SubjectName;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::DataEnvelope;
use crate::inbound::http::payload::SubjectPayload;
use crate::inbound::http::schemas::{ErrorSchema, SubjectDataSchema, SubjectListSchema};
use crate::inbound::http::state::HttpState;

/// List the subject catalogue. An empty catalogue is a normal response.
#[utoipa::path(
    get,
    path = "/api/subject",
    responses(
        (status = 200, description = "Subjects", body = SubjectListSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "listSubjects"
)]
#[get("/subject")]
pub async fn list_subjects(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let subjects = state.subjects_query.list().await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new("Subjects fetched successfully", subjects)))
}

/// Add a subject to the catalogue.
#[utoipa::path(
    post,
    path = "/api/subject",
    request_body = SubjectPayload,
    responses(
        (status = 201, description = "Subject created", body = SubjectDataSchema),
        (status = 400, description = "Missing or overlong name", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "createSubject"
)]
#[post("/subject")]
pub async fn create_subject(
    state: web::Data<HttpState>,
    payload: web::Json<SubjectPayload>,
) -> ApiResult<HttpResponse> {
    let name = SubjectName::try_from(payload.into_inner())?;
    let subject = state.subjects.create(name).await?;
    Ok(HttpResponse::Created().json(DataEnvelope::new("Subject added successfully", subject)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        MockMarksCommand, MockStudentCommand, MockStudentQuery, MockSubjectCommand,
        MockSubjectQuery,
    };
    use crate::domain::{Subject, SubjectId};
    use crate::inbound::http::api_scope;
    use crate::inbound::http::state::HttpStatePorts;

    fn state_with(subjects: MockSubjectCommand, subjects_query: MockSubjectQuery) -> HttpState {
        HttpState::new(HttpStatePorts {
            students: Arc::new(MockStudentCommand::new()),
            students_query: Arc::new(MockStudentQuery::new()),
            marks: Arc::new(MockMarksCommand::new()),
            subjects: Arc::new(subjects),
            subjects_query: Arc::new(subjects_query),
        })
    }

    #[actix_web::test]
    async fn empty_catalogue_lists_as_ok() {
        let mut query = MockSubjectQuery::new();
        query.expect_list().return_once(|| Ok(Vec::new()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(MockSubjectCommand::new(), query)))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/subject")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["message"], "Subjects fetched successfully");
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn created_subject_is_returned_under_data() {
        let mut command = MockSubjectCommand::new();
        command
            .expect_create()
            .withf(|name| name.as_str() == "Physics")
            .return_once(|name| {
                Ok(Subject {
                    id: SubjectId::new(4).expect("id"),
                    name,
                })
            });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(command, MockSubjectQuery::new())))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/subject")
            .set_json(json!({"name": "Physics"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["data"], json!({"id": 4, "name": "Physics"}));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"name": "   "}))]
    #[case(json!({"name": "x".repeat(101)}))]
    #[actix_web::test]
    async fn invalid_names_are_rejected(#[case] body: Value) {
        let mut command = MockSubjectCommand::new();
        command.expect_create().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(command, MockSubjectQuery::new())))
                .service(api_scope()),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/api/subject")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "name");
    }
}
