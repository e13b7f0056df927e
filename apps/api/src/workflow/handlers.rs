//! Axum route handlers for sessions and the standalone analysis endpoints.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ats::{ats_score, MatchResult};
use crate::analysis::diff::show_diff;
use crate::analysis::keywords::{extract_keywords, KeywordSet};
use crate::documents::{
    decode_job_description, extract_resume_text, DocumentError, InMemoryUpload, UploadedFile,
};
use crate::errors::AppError;
use crate::routes::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::workflow::report::WorkflowReport;
use crate::workflow::session::{run_action, Action};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart session form: `resume` (file), `job_description` (file), `action` (text).
pub struct SessionForm {
    pub resume: InMemoryUpload,
    pub job_description: InMemoryUpload,
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: KeywordSet,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub original: String,
    pub enhanced: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub diff: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Maps a multipart read failure. Hitting the body limit is reported as 413,
/// anything else as a malformed request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the {} MiB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// Reads the multipart session form. Unknown fields are ignored.
pub async fn read_session_form(mut multipart: Multipart) -> Result<SessionForm, AppError> {
    let mut resume = None;
    let mut job_description = None;
    let mut action = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or(name.as_str()).to_string();

        match name.as_str() {
            "resume" | "job_description" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&format!("Failed to read '{name}'"), e))?;
                let upload = InMemoryUpload::new(file_name, bytes);
                if name == "resume" {
                    resume = Some(upload);
                } else {
                    job_description = Some(upload);
                }
            }
            "action" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read 'action'", e))?;
                action = Some(text.parse::<Action>()?);
            }
            _ => {}
        }
    }

    let missing = |field: &str| AppError::Validation(format!("Missing form field '{field}'"));

    Ok(SessionForm {
        resume: resume.ok_or_else(|| missing("resume"))?,
        job_description: job_description.ok_or_else(|| missing("job_description"))?,
        action: action.ok_or_else(|| missing("action"))?,
    })
}

/// Decodes both uploads and runs the selected action.
/// Decoding runs on the blocking pool; PDF parsing in particular is CPU-bound.
pub async fn run_session(state: &AppState, form: SessionForm) -> Result<WorkflowReport, AppError> {
    let SessionForm {
        resume,
        job_description,
        action,
    } = form;
    info!(
        "Session request: action='{}' resume='{}' job_description='{}'",
        action,
        resume.name(),
        job_description.name()
    );

    let (resume_text, jd_text) = decode_blocking(move || {
        Ok((
            extract_resume_text(&resume)?,
            decode_job_description(&job_description)?,
        ))
    })
    .await?;

    run_action(
        state.tagger.as_ref(),
        state.llm.as_ref(),
        action,
        &resume_text,
        &jd_text,
    )
    .await
}

/// Runs document decoding on the blocking pool. A panicking decoder surfaces as
/// `AppError::Internal`.
async fn decode_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DocumentError> + Send + 'static,
    T: Send + 'static,
{
    let decoded = tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Document decoding task failed: {e}")))?;
    Ok(decoded?)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Runs one action and returns the structured report.
pub async fn handle_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<WorkflowReport>, AppError> {
    let form = read_session_form(multipart).await?;
    Ok(Json(run_session(&state, form).await?))
}

/// POST /api/v1/sessions/report
///
/// Same as `/sessions`, rendered as plain text. Target of the browser form.
pub async fn handle_session_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_session_form(multipart).await?;
    let report = run_session(&state, form).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report.render(),
    ))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: extract_keywords(state.tagger.as_ref(), &request.text),
    })
}

/// POST /api/v1/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Json<MatchResult> {
    Json(ats_score(
        state.tagger.as_ref(),
        &request.resume_text,
        &request.jd_text,
    ))
}

/// POST /api/v1/diff
pub async fn handle_diff(Json(request): Json<DiffRequest>) -> Json<DiffResponse> {
    Json(DiffResponse {
        diff: show_diff(&request.original, &request.enhanced),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decoded_text_is_returned() {
        let text = decode_blocking(|| Ok("Jane Doe".to_string())).await.unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[tokio::test]
    async fn test_decode_errors_keep_their_kind() {
        let err = decode_blocking::<String, _>(|| {
            Err(DocumentError::UnsupportedFormat("resume.odt".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_panicking_decoder_is_an_internal_error() {
        let err = decode_blocking::<String, _>(|| -> Result<String, DocumentError> {
            panic!("decoder crashed")
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
