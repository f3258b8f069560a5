//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The click is recorded before the response is sent, so a subsequent
/// `GET /api/links/{code}` already reflects it.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist or is a reserved segment
/// (`api`, `healthz`, `code`).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.follow_link(&code).await?;

    debug!(%code, clicks = link.click_count, "Redirecting");

    let location = HeaderValue::try_from(link.long_url.as_str())
        .map_err(|e| AppError::backend(format!("stored URL is not a valid header: {e}")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
