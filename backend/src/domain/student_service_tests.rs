//! Tests for the student service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockMarkRepository, MockStudentRepository};
use crate::domain::{
    Age, EmailAddress, ErrorCode, Mark, MarkSubject, Score, StudentName, SubjectId,
};

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

fn make_service(
    students: MockStudentRepository,
    marks: MockMarkRepository,
) -> StudentService<MockStudentRepository, MockMarkRepository> {
    StudentService::new(Arc::new(students), Arc::new(marks), Arc::new(FixtureClock))
}

fn student_id(raw: i64) -> StudentId {
    StudentId::new(raw).expect("valid id")
}

#[fixture]
fn ada() -> Student {
    let stamp = Utc
        .with_ymd_and_hms(2025, 1, 5, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Student {
        id: student_id(1),
        name: StudentName::new("Ada").expect("name"),
        email: EmailAddress::new("ada@example.com").expect("email"),
        age: Age::new(11).expect("age"),
        parent_id: None,
        registration_date: stamp,
        created_at: stamp,
        updated_at: stamp,
    }
}

fn new_student(email: &str) -> NewStudent {
    NewStudent::try_from_parts(Some("Ada".into()), Some(email.into()), Some(11), None)
        .expect("valid student")
}

#[rstest]
#[tokio::test]
async fn create_rejects_existing_email(ada: Student) {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(ada)));
    students.expect_insert().never();

    let service = make_service(students, MockMarkRepository::new());
    let error = service
        .create(new_student("ada@example.com"))
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_stamps_registration_with_clock(ada: Student) {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_email().return_once(|_| Ok(None));
    students
        .expect_insert()
        .withf(|_, registered_at| *registered_at == fixture_timestamp())
        .times(1)
        .return_once(move |_, _| Ok(ada));

    let service = make_service(students, MockMarkRepository::new());
    let created = service
        .create(new_student("ada@example.com"))
        .await
        .expect("student created");
    assert_eq!(created.id, student_id(1));
}

#[tokio::test]
async fn create_maps_unique_violation_race_to_conflict() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_email().return_once(|_| Ok(None));
    students
        .expect_insert()
        .return_once(|_, _| Err(StudentRepositoryError::duplicate_email("ada@example.com")));

    let service = make_service(students, MockMarkRepository::new());
    let error = service
        .create(new_student("ada@example.com"))
        .await
        .expect_err("race lost");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn connection_failures_become_internal_errors() {
    let mut students = MockStudentRepository::new();
    students
        .expect_list()
        .return_once(|| Err(StudentRepositoryError::connection("pool timed out")));

    let service = make_service(students, MockMarkRepository::new());
    let error = service.list().await.expect_err("pool down");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.message().contains("pool timed out"));
}

#[tokio::test]
async fn update_reports_missing_student() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(students, MockMarkRepository::new());
    let changes = StudentChanges::try_from_parts(Some("Grace".into()), None, None, None)
        .expect("valid changes");
    let error = service
        .update(student_id(9), changes)
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), STUDENT_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(Some(None))]
#[case(Some(Some(4)))]
#[case(None)]
#[tokio::test]
async fn update_rejects_repeated_information_regardless_of_parent(
    ada: Student,
    #[case] parent_id: Option<Option<i64>>,
) {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ada)));
    students.expect_update().never();

    let service = make_service(students, MockMarkRepository::new());
    let changes = StudentChanges::try_from_parts(
        Some("Ada".into()),
        Some("ada@example.com".into()),
        Some(11),
        parent_id,
    )
    .expect("valid changes");
    let error = service
        .update(student_id(1), changes)
        .await
        .expect_err("no-op");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Same information provided");
}

#[rstest]
#[tokio::test]
async fn update_applies_only_supplied_fields(ada: Student) {
    let stored = ada.clone();
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    students
        .expect_update()
        .withf(|_, update, updated_at| {
            update.name.as_str() == "Ada"
                && update.email.as_str() == "ada@example.com"
                && update.age.as_i32() == 12
                && update.parent_id.is_none()
                && *updated_at == fixture_timestamp()
        })
        .times(1)
        .return_once(move |_, update, _| {
            Ok(Some(Student {
                age: update.age,
                ..ada
            }))
        });

    let service = make_service(students, MockMarkRepository::new());
    let changes =
        StudentChanges::try_from_parts(None, None, Some(12), None).expect("valid changes");
    let updated = service
        .update(student_id(1), changes)
        .await
        .expect("updated");
    assert_eq!(updated.age.as_i32(), 12);
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_owned_by_another_student(ada: Student) {
    let other = Student {
        id: student_id(2),
        email: EmailAddress::new("grace@example.com").expect("email"),
        ..ada.clone()
    };
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(ada)));
    students
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(other)));
    students.expect_update().never();

    let service = make_service(students, MockMarkRepository::new());
    let changes = StudentChanges::try_from_parts(None, Some("grace@example.com".into()), None, None)
        .expect("valid changes");
    let error = service
        .update(student_id(1), changes)
        .await
        .expect_err("email taken");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn delete_removes_marks_before_student(ada: Student) {
    let mut sequence = mockall::Sequence::new();
    let mut students = MockStudentRepository::new();
    let mut marks = MockMarkRepository::new();
    students
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| Ok(Some(ada)));
    marks
        .expect_delete_for_student()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(3));
    students
        .expect_delete()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(true));

    let service = make_service(students, marks);
    service.delete(student_id(1)).await.expect("deleted");
}

#[tokio::test]
async fn delete_of_missing_student_touches_nothing() {
    let mut students = MockStudentRepository::new();
    let mut marks = MockMarkRepository::new();
    students.expect_find_by_id().return_once(|_| Ok(None));
    marks.expect_delete_for_student().never();
    students.expect_delete().never();

    let service = make_service(students, marks);
    let error = service.delete(student_id(5)).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_treats_empty_table_as_not_found() {
    let mut students = MockStudentRepository::new();
    students.expect_list().return_once(|| Ok(Vec::new()));

    let service = make_service(students, MockMarkRepository::new());
    let error = service.list().await.expect_err("empty");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No students found");
}

#[tokio::test]
async fn get_reports_missing_student_data() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(students, MockMarkRepository::new());
    let error = service.get(student_id(3)).await.expect_err("missing");
    assert_eq!(error.message(), "Student data not found.");
}

#[tokio::test]
async fn marks_lists_joined_rows() {
    let mut marks = MockMarkRepository::new();
    marks.expect_list_for_student().return_once(|student| {
        Ok(vec![StudentMark {
            mark: Mark {
                id: 1,
                student_id: student,
                subject_id: SubjectId::new(2).expect("subject"),
                marks: Score::new(88).expect("score"),
                date: fixture_timestamp(),
            },
            subject: MarkSubject {
                id: SubjectId::new(2).expect("subject"),
                name: "Maths".into(),
            },
        }])
    });

    let service = make_service(MockStudentRepository::new(), marks);
    let listed = service.marks(student_id(1)).await.expect("marks");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].subject.name, "Maths");
}

#[tokio::test]
async fn marks_treats_empty_listing_as_not_found() {
    let mut marks = MockMarkRepository::new();
    marks
        .expect_list_for_student()
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(MockStudentRepository::new(), marks);
    let error = service.marks(student_id(1)).await.expect_err("none");
    assert_eq!(error.message(), "No marks found for this student.");
}
