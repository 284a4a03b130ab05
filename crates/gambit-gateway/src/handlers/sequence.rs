use axum::extract::{Path, State};
use axum::Json;
use gambit_codec::CodecStats;
use gambit_core::Availability;

use crate::error::Result;
use crate::model::ApiResponse;
use crate::state::AppState;

pub async fn availability_handler(
    State(state): State<AppState>,
    Path(sequence): Path<String>,
) -> Result<Json<ApiResponse<Availability>>> {
    let availability = state.shortener().check_availability(&sequence).await?;
    Ok(Json(ApiResponse::ok(availability)))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<ApiResponse<CodecStats>> {
    Json(ApiResponse::ok(state.shortener().stats()))
}
