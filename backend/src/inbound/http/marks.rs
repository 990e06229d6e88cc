//! Mark recording handler.
//!
//! ```text
//! POST /api/marks {"studentId":1,"marksList":[{"subjectId":2,"marks":87}]}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::domain::MarkSubmission;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::DataEnvelope;
use crate::inbound::http::payload::MarksPayload;
use crate::inbound::http::schemas::{ErrorSchema, MarksRecordedEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Record marks for one student, overwriting existing subject marks.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use records_backend::inbound::http::marks::record_marks;
///
/// let app = App::new().service(record_marks);
/// ```
#[utoipa::path(
    post,
    path = "/api/marks",
    request_body = MarksPayload,
    responses(
        (status = 201, description = "Marks recorded", body = MarksRecordedEnvelopeSchema),
        (status = 400, description = "Missing student id or malformed marks list", body = ErrorSchema),
        (status = 404, description = "Student or subject not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["marks"],
    operation_id = "recordMarks"
)]
#[post("/marks")]
pub async fn record_marks(
    state: web::Data<HttpState>,
    payload: web::Json<MarksPayload>,
) -> ApiResult<HttpResponse> {
    let submission = MarkSubmission::try_from(payload.into_inner())?;
    let recorded = state.marks.record(submission).await?;
    Ok(HttpResponse::Created().json(DataEnvelope::new(
        "Marks recorded successfully for all subjects.",
        recorded,
    )))
}
