//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::ingest::decode_document;
use crate::screening::export::{export_file_name, to_csv, ExportRow};
use crate::screening::{extract, FitScorer, ScoreBreakdown};
use crate::state::AppState;
use crate::usage::{UsageCounter, UsageSnapshot};

const JD_FIELD: &str = "job_description";
const RESUME_FIELD: &str = "resume";
const DEFAULT_TEXT_FILE_NAME: &str = "resume.txt";
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScreenQuery {
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct ScreenTextRequest {
    pub job_description: String,
    pub resume_text: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactsView {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub file_name: String,
    pub breakdown: ScoreBreakdown,
    pub contacts: ContactsView,
    pub detected_skills: Vec<String>,
    /// Raw detection; `breakdown.resume_years` is the same value defaulted to 0.
    pub detected_years: Option<u32>,
    pub export_row: ExportRow,
}

struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/usage
///
/// Free screenings used and remaining today.
pub async fn handle_usage(State(state): State<AppState>) -> Result<Json<UsageSnapshot>, AppError> {
    let snapshot = with_usage(&state, |counter| counter.snapshot(today()))?;
    Ok(Json(snapshot))
}

/// POST /api/v1/screen
///
/// Multipart form: `job_description` text field plus a `resume` file
/// (PDF / DOCX / TXT). `?format=csv` downloads the export row instead of JSON.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    guard_usage(&state)?;

    let (job_description, upload) = read_upload(multipart).await?;
    let job_description = job_description.unwrap_or_default();
    ensure_job_description(&job_description)?;

    let upload = upload.ok_or_else(|| AppError::Validation("Please upload a resume file.".to_string()))?;
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded resume file is empty.".to_string()));
    }

    let max_bytes = state.config.max_upload_bytes();
    if upload.bytes.len() > max_bytes {
        let size_mb = upload.bytes.len() as f64 / BYTES_PER_MB;
        warn!(file = %upload.file_name, size_mb, "upload rejected: over size cap");
        return Err(AppError::PayloadTooLarge(format!(
            "File is {size_mb:.2} MB. Demo cap is {:.0} MB.",
            state.config.max_upload_mb
        )));
    }

    let file_name = upload.file_name.clone();
    let resume_text = tokio::task::spawn_blocking(move || {
        decode_document(&upload.file_name, &upload.bytes)
    })
    .await
    .map_err(|e| AppError::UnprocessableEntity(format!("Failed to read file: decoder aborted ({e})")))?
    .inspect_err(|e| warn!(file = %file_name, error = %e, "upload rejected: decode failed"))?;

    let response = screen(state.fit_scorer.as_ref(), &file_name, &job_description, &resume_text);
    finish(&state, response, query.format)
}

/// POST /api/v1/screen/text
///
/// Same pipeline for callers that already hold the resume as plain text.
pub async fn handle_screen_text(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
    Json(request): Json<ScreenTextRequest>,
) -> Result<Response, AppError> {
    guard_usage(&state)?;
    ensure_job_description(&request.job_description)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let file_name = request
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT_FILE_NAME.to_string());

    let response = screen(
        state.fit_scorer.as_ref(),
        &file_name,
        &request.job_description,
        &request.resume_text,
    );
    finish(&state, response, query.format)
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline helpers
// ────────────────────────────────────────────────────────────────────────────

fn screen(
    scorer: &dyn FitScorer,
    file_name: &str,
    job_description: &str,
    resume_text: &str,
) -> ScreenResponse {
    let resume = extract(resume_text, scorer.vocabulary());
    let breakdown = scorer.score(job_description, resume_text);
    let export_row = ExportRow::new(file_name, &breakdown, &resume);

    ScreenResponse {
        file_name: file_name.to_string(),
        breakdown,
        contacts: ContactsView {
            emails: resume.emails,
            phones: resume.phones,
        },
        detected_skills: resume.skills,
        detected_years: resume.years,
        export_row,
    }
}

/// Records the screening against today's quota and renders it.
fn finish(
    state: &AppState,
    response: ScreenResponse,
    format: ResponseFormat,
) -> Result<Response, AppError> {
    let rendered = match format {
        ResponseFormat::Json => Json(&response).into_response(),
        ResponseFormat::Csv => csv_attachment(&response)?,
    };

    with_usage(state, |counter| counter.record(today()))?;
    info!(
        file = %response.file_name,
        score = response.breakdown.score,
        matched = response.breakdown.matched_skills.len(),
        missing = response.breakdown.missing_skills.len(),
        "resume screened"
    );
    Ok(rendered)
}

fn csv_attachment(response: &ScreenResponse) -> Result<Response, AppError> {
    let csv = to_csv(std::slice::from_ref(&response.export_row))?;
    // Header values must stay visible ASCII; the quote would end the filename parameter.
    let download_name: String = export_file_name(&response.file_name)
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && *c != '"')
        .collect();
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        ),
    ];
    Ok((StatusCode::OK, headers, csv).into_response())
}

async fn read_upload(
    mut multipart: Multipart,
) -> Result<(Option<String>, Option<UploadedFile>), AppError> {
    let mut job_description = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JD_FIELD) => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            Some(RESUME_FIELD) => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_default();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok((job_description, upload))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

fn ensure_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please paste the Job Description first.".to_string(),
        ));
    }
    Ok(())
}

fn guard_usage(state: &AppState) -> Result<(), AppError> {
    with_usage(state, |counter| counter.check(today()))?.inspect_err(|e| warn!("{e}"))?;
    Ok(())
}

fn with_usage<T>(state: &AppState, f: impl FnOnce(&mut UsageCounter) -> T) -> Result<T, AppError> {
    let mut counter = state
        .usage
        .lock()
        .map_err(|_| anyhow::anyhow!("usage counter lock poisoned"))?;
    Ok(f(&mut counter))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
