//! HTTP inbound adapter exposing the records REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod marks;
pub mod payload;
pub mod schemas;
pub mod state;
pub mod students;
pub mod subjects;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api` scope with every record route and the JSON/path error
/// handlers that keep extractor failures in the standard error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use records_backend::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(students::list_students)
        .service(students::create_student)
        .service(students::get_student_marks)
        .service(students::get_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(marks::record_marks)
        .service(subjects::list_subjects)
        .service(subjects::create_subject)
}
