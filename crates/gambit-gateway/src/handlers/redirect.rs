use axum::extract::{Path, State};
use axum::response::Redirect;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Follows a short link, counting the visit.
///
/// Malformed sequences are reported as missing.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Redirect> {
    let not_found = || AppError::NotFound(format!("chess sequence not found: {raw}"));

    let Ok(sequence) = state.shortener().parse_sequence(&raw) else {
        return Err(not_found());
    };

    match state.shortener().visit(&sequence).await? {
        Some(record) => {
            debug!(sequence = %sequence, visits = record.visit_count, "redirecting");
            Ok(Redirect::temporary(&record.original_url))
        }
        None => Err(not_found()),
    }
}
