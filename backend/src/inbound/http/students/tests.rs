//! Tests for student API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockMarksCommand, MockStudentCommand, MockStudentQuery, MockSubjectCommand, MockSubjectQuery,
};
use crate::domain::{Age, EmailAddress, Student, StudentName};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpStatePorts;

#[fixture]
fn ada() -> Student {
    let stamp = Utc
        .with_ymd_and_hms(2025, 2, 3, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Student {
        id: StudentId::new(1).expect("id"),
        name: StudentName::new("Ada").expect("name"),
        email: EmailAddress::new("ada@example.com").expect("email"),
        age: Age::new(11).expect("age"),
        parent_id: None,
        registration_date: stamp,
        created_at: stamp,
        updated_at: stamp,
    }
}

fn state_with(students: MockStudentCommand, students_query: MockStudentQuery) -> HttpState {
    HttpState::new(HttpStatePorts {
        students: Arc::new(students),
        students_query: Arc::new(students_query),
        marks: Arc::new(MockMarksCommand::new()),
        subjects: Arc::new(MockSubjectCommand::new()),
        subjects_query: Arc::new(MockSubjectQuery::new()),
    })
}

async fn send(
    students: MockStudentCommand,
    students_query: MockStudentQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(students, students_query)))
            .service(api_scope()),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn list_wraps_students_in_data(ada: Student) {
    let mut query = MockStudentQuery::new();
    query.expect_list().return_once(move || Ok(vec![ada]));

    let (status, body) = send(
        MockStudentCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/student"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Students fetched successfully");
    assert_eq!(body["data"][0]["email"], "ada@example.com");
    assert!(body["data"][0].get("createdAt").is_some());
}

#[rstest]
#[actix_web::test]
async fn create_returns_student_envelope(ada: Student) {
    let mut command = MockStudentCommand::new();
    command
        .expect_create()
        .withf(|student| student.age.as_i32() == 11 && student.parent_id.is_none())
        .return_once(move |_| Ok(ada));

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::post().uri("/api/student").set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "age": "11",
            "parent_id": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student added successfully");
    assert_eq!(body["student"]["id"], 1);
}

#[rstest]
#[case(json!({"name": "Ada", "age": 11}), "Member name, email, and age are required.", None)]
#[case(json!({"name": "Ada", "email": "ada.example.com", "age": 11}), "Invalid email format.", Some("email"))]
#[case(json!({"name": "Ada", "email": "ada@example.com", "age": -1}), "Age must be a positive number.", Some("age"))]
#[actix_web::test]
async fn create_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] message: &str,
    #[case] field: Option<&str>,
) {
    let mut command = MockStudentCommand::new();
    command.expect_create().never();

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/student")
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
    assert_eq!(body["details"]["field"].as_str(), field);
}

#[actix_web::test]
async fn duplicate_email_conflict_is_a_bad_request() {
    let mut command = MockStudentCommand::new();
    command.expect_create().return_once(|_| {
        Err(Error::conflict("A student with this email already exists."))
    });

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::post().uri("/api/student").set_json(json!({
            "name": "Ada", "email": "ada@example.com", "age": 11
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(
                MockStudentCommand::new(),
                MockStudentQuery::new(),
            )))
            .service(api_scope()),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/student")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn non_numeric_id_is_a_bad_request() {
    let mut query = MockStudentQuery::new();
    query.expect_get().never();

    let (status, body) = send(
        MockStudentCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/student/abc"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_path");
}

#[rstest]
#[case("/api/student/0", "Student data not found.")]
#[case("/api/student/-4", "Student data not found.")]
#[case("/api/student/0/marks", "No marks found for this student.")]
#[actix_web::test]
async fn non_positive_ids_are_not_found(#[case] uri: &str, #[case] message: &str) {
    let mut query = MockStudentQuery::new();
    query.expect_get().never();
    query.expect_marks().never();

    let (status, body) = send(
        MockStudentCommand::new(),
        query,
        actix_test::TestRequest::get().uri(uri),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn get_wraps_student_in_data(ada: Student) {
    let mut query = MockStudentQuery::new();
    query
        .expect_get()
        .withf(|id| id.as_i32() == 1)
        .return_once(move |_| Ok(ada));

    let (status, body) = send(
        MockStudentCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/student/1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student data fetched successfully");
    assert_eq!(body["data"]["name"], "Ada");
}

#[actix_web::test]
async fn empty_update_is_rejected_before_lookup() {
    let mut command = MockStudentCommand::new();
    command.expect_update().never();

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/student/1")
            .set_json(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "no_changes");
}

#[rstest]
#[actix_web::test]
async fn update_clears_parent_on_explicit_null(ada: Student) {
    let mut command = MockStudentCommand::new();
    command
        .expect_update()
        .withf(|id, changes| id.as_i32() == 1 && changes.parent_id == Some(None))
        .return_once(move |_, _| Ok(ada));

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/student/1")
            .set_json(json!({"parent_id": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully.");
    assert!(body["student"]["parent_id"].is_null());
}

#[actix_web::test]
async fn delete_reports_success_message() {
    let mut command = MockStudentCommand::new();
    command.expect_delete().times(1).return_once(|_| Ok(()));

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::delete().uri("/api/student/1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Student and their marks deleted successfully."})
    );
}

#[actix_web::test]
async fn delete_of_missing_student_is_not_found() {
    let mut command = MockStudentCommand::new();
    command
        .expect_delete()
        .return_once(|_| Err(Error::not_found("Student not found.")));

    let (status, body) = send(
        command,
        MockStudentQuery::new(),
        actix_test::TestRequest::delete().uri("/api/student/8"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found.");
}
