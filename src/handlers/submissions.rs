use crate::handlers::common::{created_response, json_body};
use crate::{
    errors::ApiError,
    models::{ContactData, ContactSubmission, InquiryData, InquirySubmission, SubmissionResponse},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};

const CONTACT_WARNING: &str = "Form submitted but notification email failed";
const INQUIRY_WARNING: &str = "Inquiry submitted but notification email failed";

/// Contact and inquiry form routes
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/contact-us", post(submit_contact))
        .route("/contact-us/", post(submit_contact))
        .route("/inquiry", post(submit_inquiry))
        .route("/inquiry/", post(submit_inquiry))
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/contact-us/",
    request_body = ContactSubmission,
    responses(
        (status = 201, description = "Contact form stored", body = SubmissionResponse<ContactData>),
        (status = 400, description = "Invalid data provided", body = crate::errors::ErrorResponse)
    ),
    tag = "Submissions"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Response, ApiError> {
    let submission = json_body(payload)?;
    let submitted = state.services.submissions.submit_contact(submission).await?;

    Ok(created_response(SubmissionResponse::new(
        "Contact form submitted successfully",
        ContactData::from(&submitted.record),
        (!submitted.notified).then_some(CONTACT_WARNING),
    )))
}

/// Submit a product inquiry
#[utoipa::path(
    post,
    path = "/inquiry/",
    request_body = InquirySubmission,
    responses(
        (status = 201, description = "Inquiry stored", body = SubmissionResponse<InquiryData>),
        (status = 400, description = "Invalid data provided", body = crate::errors::ErrorResponse)
    ),
    tag = "Submissions"
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquirySubmission>, JsonRejection>,
) -> Result<Response, ApiError> {
    let submission = json_body(payload)?;
    let submitted = state.services.submissions.submit_inquiry(submission).await?;

    Ok(created_response(SubmissionResponse::new(
        "Inquiry submitted successfully",
        submitted.record.to_data(),
        (!submitted.notified).then_some(INQUIRY_WARNING),
    )))
}
