//! Axum route handlers for the Prompt API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::prompts::options::{catalog, OptionsCatalog, UPLOAD_EXTENSIONS};
use crate::prompts::pipeline::{generate_prompt, GeneratedPrompt, PromptRequest};
use crate::state::AppState;

pub const DOWNLOAD_FILE_NAME: &str = "organized_prompt.json";
const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub raw_text: String,
    pub length: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn run(state: &AppState, mut request: PromptRequest) -> Result<GeneratedPrompt, AppError> {
    request.generation = request.generation.clamped();
    generate_prompt(
        state.connector.as_ref(),
        state.ids.as_ref(),
        state.config.deepseek_api_key.as_deref(),
        request,
    )
    .await
}

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsCatalog> {
    Json(catalog())
}

/// POST /api/v1/prompts/generate
///
/// Processes raw text with one completion call and returns the envelope
/// JSON text plus length stats.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<GeneratedPrompt>, AppError> {
    let Json(request) = payload?;
    let generated = run(&state, request).await?;
    Ok(Json(generated))
}

/// POST /api/v1/prompts/download
///
/// Same pipeline as generate, served as an `organized_prompt.json` attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let generated = run(&state, request).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        generated.prompt,
    ))
}

/// POST /api/v1/prompts/upload
///
/// Reads a UTF-8 text file from the `file` multipart field and returns its
/// content for use as `raw_text`.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.txt").to_string();
        check_extension(&file_name)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Error reading file: {e}")))?;
        let raw_text = String::from_utf8(bytes.to_vec())
            .map_err(|e| AppError::Validation(format!("Error reading file: {e}")))?;

        info!("Uploaded {} ({} bytes)", file_name, bytes.len());
        let length = raw_text.chars().count();
        return Ok(Json(UploadResponse {
            file_name,
            raw_text,
            length,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn check_extension(file_name: &str) -> Result<(), AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unsupported file type '{file_name}'. Allowed: {}",
            UPLOAD_EXTENSIONS.join(", ")
        )))
    }
}
