//! Link creation, lookup, redirect and deletion service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::application::services::code_allocator::CodeAllocator;
use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_long_url;

/// First path segments that belong to other routes and never redirect.
pub const RESERVED_SEGMENTS: &[&str] = &["api", "healthz", "code"];

/// How many times a generated code that lost a creation race is replaced
/// by a fresh allocation.
const GENERATED_CODE_RACE_RETRIES: usize = 3;

/// Service for creating and following shortened links.
///
/// Creation goes through the [`CodeAllocator`]; every other operation talks
/// to the store directly.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    allocator: CodeAllocator<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self {
            allocator: CodeAllocator::new(link_repository.clone()),
            link_repository,
        }
    }

    /// Creates a short link.
    ///
    /// An empty `short_code` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is not an absolute
    /// http(s) URL or the requested code is malformed. The URL is checked
    /// before any store access.
    ///
    /// Returns [`AppError::Conflict`] if the requested code exists, including
    /// when a concurrent request claims it between the check and the insert.
    ///
    /// Returns [`AppError::AllocationExhausted`] if no free code could be generated.
    pub async fn create_link(
        &self,
        long_url: &str,
        short_code: Option<&str>,
    ) -> Result<Link, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let link = match short_code.filter(|c| !c.is_empty()) {
            Some(requested) => {
                let code = self.allocator.allocate(Some(requested)).await?;
                self.link_repository
                    .create(NewLink::new(code, long_url))
                    .await?
            }
            None => self.create_with_generated_code(long_url).await?,
        };

        info!(short_code = %link.short_code, "Link created");
        Ok(link)
    }

    async fn create_with_generated_code(&self, long_url: &str) -> Result<Link, AppError> {
        for _ in 0..GENERATED_CODE_RACE_RETRIES {
            let code = self.allocator.allocate(None).await?;

            match self
                .link_repository
                .create(NewLink::new(code, long_url))
                .await
            {
                Ok(link) => return Ok(link),
                Err(StoreError::DuplicateCode(code)) => {
                    debug!(%code, "Generated short code claimed concurrently, reallocating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict(
            "Generated short code was repeatedly claimed by concurrent requests",
            json!({ "retries": GENERATED_CODE_RACE_RETRIES }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .get(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))
    }

    /// All links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.link_repository.list().await?)
    }

    /// Resolves a redirect: looks the link up, then counts the click.
    ///
    /// Returns the link with the updated counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for reserved segments, unknown codes,
    /// and links deleted between the lookup and the click.
    ///
    /// Returns [`AppError::Backend`] without counting the click if the stored
    /// URL cannot be sent as a `Location` header.
    pub async fn follow_link(&self, short_code: &str) -> Result<Link, AppError> {
        if RESERVED_SEGMENTS.contains(&short_code) {
            return Err(AppError::not_found("Not found", json!({})));
        }

        let link = self
            .link_repository
            .get(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))?;

        // Only clicks that end in a redirect are counted.
        if let Err(e) = validate_long_url(&link.long_url) {
            return Err(AppError::backend(format!(
                "stored URL of '{short_code}' is not redirectable: {e}"
            )));
        }

        Ok(self.link_repository.record_click(short_code).await?)
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, short_code: &str) -> Result<(), AppError> {
        self.link_repository.delete(short_code).await?;
        info!(short_code, "Link deleted");
        Ok(())
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "shortCode": short_code }))
}
