//! Axum route handlers for bookings and contact messages.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::submissions::models::{BookingRequest, ContactRequest, Submission};
use crate::submissions::SubmissionAck;

/// POST /api/v1/bookings
pub async fn handle_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<SubmissionAck>, AppError> {
    let Json(request) = payload?;
    submit(&state, Submission::Booking(request)).await
}

/// POST /api/v1/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmissionAck>, AppError> {
    let Json(request) = payload?;
    submit(&state, Submission::Contact(request)).await
}

async fn submit(state: &AppState, submission: Submission) -> Result<Json<SubmissionAck>, AppError> {
    submission.validate()?;
    let ack = state.submitter.submit(&submission).await?;
    Ok(Json(ack))
}
