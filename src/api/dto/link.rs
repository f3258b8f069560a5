//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Body of `POST /api/links`.
///
/// Format rules for `shortCode` are enforced by the code allocator so the
/// same checks apply to every caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(required(message = "longUrl is required"))]
    pub long_url: Option<String>,

    /// Optional custom code; absent or empty means "generate one".
    pub short_code: Option<String>,
}

/// A link as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            long_url: link.long_url,
            created_at: link.created_at,
            click_count: link.click_count,
            last_clicked: link.last_clicked,
        }
    }
}
