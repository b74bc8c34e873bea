//! Axum route handlers for the Diagnostics API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::Serialize;

use crate::diagnostics::models::{
    DeviceCategory, DiagnosticRequest, DiagnosticSolution, MediaAttachment, SymptomPreset,
};
use crate::diagnostics::session::DiagnosticSession;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub solutions: Vec<DiagnosticSolution>,
    /// Pre-fills the booking form if the user escalates.
    pub booking_summary: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceInfo {
    pub id: DeviceCategory,
    pub name: &'static str,
    pub presets: &'static [SymptomPreset],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/diagnostics/devices
pub async fn handle_list_devices() -> Json<Vec<DeviceInfo>> {
    Json(
        DeviceCategory::ALL
            .into_iter()
            .map(|device| DeviceInfo {
                id: device,
                name: device.display_name(),
                presets: device.symptom_presets(),
            })
            .collect(),
    )
}

/// POST /api/v1/diagnostics/analyze
///
/// JSON body with the media (if any) already base64-encoded.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<DiagnosticRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    if let Some(media) = &request.media {
        check_media(media, state.config.max_media_bytes)?;
    }
    run_analysis(&state, request).await
}

/// POST /api/v1/diagnostics/analyze/upload
///
/// Multipart form: `device`, `description`, optional `media` file.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut device: Option<DeviceCategory> = None;
    let mut description = String::new();
    let mut media: Option<MediaAttachment> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "device" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable device field: {e}")))?;
                device = Some(
                    text.parse::<DeviceCategory>()
                        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?,
                );
            }
            "description" => {
                description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable description field: {e}"))
                })?;
            }
            "media" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable media file: {e}")))?;
                if data.is_empty() {
                    continue;
                }
                if data.len() > state.config.max_media_bytes {
                    return Err(too_large(state.config.max_media_bytes));
                }
                let attachment = MediaAttachment {
                    data: BASE64.encode(&data),
                    mime_type,
                };
                check_media(&attachment, state.config.max_media_bytes)?;
                media = Some(attachment);
            }
            other => {
                tracing::debug!("Ignoring unknown multipart field '{other}'");
            }
        }
    }

    let device = device
        .ok_or_else(|| AppError::UnprocessableEntity("device is required".to_string()))?;

    run_analysis(
        &state,
        DiagnosticRequest {
            device,
            description,
            media,
        },
    )
    .await
}

/// Drives one session through the wizard so preconditions are enforced
/// before the model is called.
async fn run_analysis(
    state: &AppState,
    request: DiagnosticRequest,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut session = DiagnosticSession::new();
    session.select_category(request.device)?;
    session.set_description(request.description)?;
    if let Some(media) = request.media {
        session.attach_media(media)?;
    }

    let request = session.begin_analysis()?;
    let solutions = state.diagnostics.analyze(&request).await;
    session.complete(solutions)?;

    let booking_summary = session.booking_summary().unwrap_or_default().to_string();
    Ok(Json(AnalyzeResponse {
        solutions: session.into_solutions(),
        booking_summary,
    }))
}

/// Photos and videos only, within the configured size.
fn check_media(media: &MediaAttachment, max_bytes: usize) -> Result<(), AppError> {
    if !(media.mime_type.starts_with("image/") || media.mime_type.starts_with("video/")) {
        return Err(AppError::Validation(format!(
            "Unsupported media type '{}': attach a photo or a video",
            media.mime_type
        )));
    }
    // decoded size of a base64 payload is at most 3/4 of its length
    if media.data.len() / 4 * 3 > max_bytes {
        return Err(too_large(max_bytes));
    }
    Ok(())
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "Media attachment exceeds {} MB",
        max_bytes / (1024 * 1024)
    ))
}
