use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gambit_core::{ExpirationPolicy, ShortenParams};

use crate::error::{AppError, Result};
use crate::model::{ApiResponse, CreateUrlRequest, UrlResponse};
use crate::state::AppState;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn expiration(expires_in: Option<u32>) -> Result<ExpirationPolicy> {
    match expires_in {
        None => Ok(ExpirationPolicy::Never),
        Some(0) => Err(AppError::BadRequest(
            "expiresIn must be at least one day".to_string(),
        )),
        Some(days) => Ok(ExpirationPolicy::AfterDuration(Duration::from_secs(
            u64::from(days) * SECONDS_PER_DAY,
        ))),
    }
}

pub async fn create_url_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UrlResponse>>> {
    let Json(request) = request?;
    let params = ShortenParams {
        original_url: request.url,
        expiration: expiration(request.expires_in)?,
        custom_sequence: request.custom_sequence.filter(|s| !s.is_empty()),
        title: request.title,
        description: request.description,
        max_visits: request.max_visits,
    };

    let shortened = state.shortener().shorten(params).await?;
    let short_url = state.short_url(&shortened.sequence);

    Ok(Json(
        ApiResponse::ok(UrlResponse::new(&shortened.sequence, short_url, shortened.record))
            .with_message("chess URL created"),
    ))
}

pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<UrlResponse>>> {
    let sequence = state.shortener().parse_sequence(&raw)?;

    let record = state
        .shortener()
        .resolve(&sequence)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("chess sequence not found: {sequence}")))?;

    let short_url = state.short_url(&sequence);
    Ok(Json(ApiResponse::ok(UrlResponse::new(
        &sequence, short_url, record,
    ))))
}

pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<StatusCode> {
    let sequence = state.shortener().parse_sequence(&raw)?;

    if state.shortener().delete(&sequence).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "chess sequence not found: {sequence}"
        )))
    }
}
