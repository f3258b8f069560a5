//! Repository trait for short link storage.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Durable, uniquely keyed storage for links.
///
/// Every method either completes or fails as a whole. Implementations must
/// enforce short-code uniqueness in [`create`](Self::create) and perform the
/// increment of [`record_click`](Self::record_click) as one indivisible step.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `click_count = 0` and no `last_clicked`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code is already taken,
    /// including when a concurrent caller inserted it first.
    /// Returns [`StoreError::Backend`] on storage faults.
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Point lookup by short code. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage faults.
    async fn get(&self, short_code: &str) -> Result<Option<Link>, StoreError>;

    /// All links, newest first. Links created at the same instant are ordered
    /// by descending insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage faults.
    async fn list(&self) -> Result<Vec<Link>, StoreError>;

    /// Atomically increments `click_count` and sets `last_clicked` to now.
    ///
    /// Returns the link as it is after the update.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    /// Returns [`StoreError::Backend`] on storage faults.
    async fn record_click(&self, short_code: &str) -> Result<Link, StoreError>;

    /// Permanently removes a link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    /// Returns [`StoreError::Backend`] on storage faults.
    async fn delete(&self, short_code: &str) -> Result<(), StoreError>;
}
