//! Short code allocation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::AllocationError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{self, MAX_ATTEMPTS};

/// Decides the short code for a new link.
///
/// The existence check performed here only saves a round trip in the common
/// case. Uniqueness is guaranteed by [`LinkRepository::create`], so a code
/// returned by [`allocate`](Self::allocate) can still be lost to a concurrent
/// creator.
pub struct CodeAllocator<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> CodeAllocator<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Validates a requested code, or generates a free one when none is given.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidFormat`] if `requested` is not 1-20 alphanumeric characters
    /// - [`AllocationError::AlreadyExists`] if `requested` is taken
    /// - [`AllocationError::Exhausted`] if every generated candidate was taken
    /// - [`AllocationError::Store`] if the existence check failed
    pub async fn allocate(&self, requested: Option<&str>) -> Result<String, AllocationError> {
        match requested {
            Some(code) => self.reserve_requested(code).await,
            None => self.generate_free().await,
        }
    }

    async fn reserve_requested(&self, code: &str) -> Result<String, AllocationError> {
        if !code_generator::is_valid_code(code) {
            return Err(AllocationError::InvalidFormat(code.to_string()));
        }

        if self.link_repository.get(code).await?.is_some() {
            return Err(AllocationError::AlreadyExists(code.to_string()));
        }

        Ok(code.to_string())
    }

    async fn generate_free(&self) -> Result<String, AllocationError> {
        let rng = StdRng::from_rng(&mut rand::rng());

        for (attempt, candidate) in code_generator::candidates(rng).enumerate() {
            if self.link_repository.get(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            debug!(attempt = attempt + 1, %candidate, "Generated short code collided");
        }

        Err(AllocationError::Exhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use std::sync::Mutex;

    fn existing(code: &str) -> Link {
        Link::new(
            1,
            code.to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            0,
            None,
        )
    }

    fn allocator(mock: MockLinkRepository) -> CodeAllocator<MockLinkRepository> {
        CodeAllocator::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_requested_code_returned_unchanged() {
        let mut mock = MockLinkRepository::new();
        mock.expect_get()
            .withf(|code| code == "MyLink42")
            .times(1)
            .returning(|_| Ok(None));

        let code = allocator(mock).allocate(Some("MyLink42")).await.unwrap();

        assert_eq!(code, "MyLink42");
    }

    #[tokio::test]
    async fn test_requested_code_invalid_format_skips_store() {
        let mut mock = MockLinkRepository::new();
        mock.expect_get().times(0);
        let allocator = allocator(mock);

        for bad in ["", "has-dash", "has space", "abcdefghij01234567890", "ümlaut"] {
            let result = allocator.allocate(Some(bad)).await;
            assert_eq!(
                result,
                Err(AllocationError::InvalidFormat(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_requested_code_already_exists() {
        let mut mock = MockLinkRepository::new();
        mock.expect_get()
            .times(1)
            .returning(|code| Ok(Some(existing(code))));

        let result = allocator(mock).allocate(Some("taken")).await;

        assert_eq!(result, Err(AllocationError::AlreadyExists("taken".into())));
    }

    #[tokio::test]
    async fn test_generated_code_format() {
        let mut mock = MockLinkRepository::new();
        mock.expect_get().times(1).returning(|_| Ok(None));

        let code = allocator(mock).allocate(None).await.unwrap();

        assert!((6..=8).contains(&code.len()));
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_generation_retries_until_free() {
        let mut mock = MockLinkRepository::new();
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        mock.expect_get().times(4).returning(move |code| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n < 4 { Ok(Some(existing(code))) } else { Ok(None) }
        });

        let code = allocator(mock).allocate(None).await.unwrap();

        assert!(code_generator::is_valid_code(&code));
        assert_eq!(*calls.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_generation_exhausted_after_twenty_attempts() {
        let mut mock = MockLinkRepository::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        mock.expect_get().times(MAX_ATTEMPTS).returning(move |code| {
            log.lock().unwrap().push(code.to_string());
            Ok(Some(existing(code)))
        });

        let result = allocator(mock).allocate(None).await;

        assert_eq!(result, Err(AllocationError::Exhausted { attempts: 20 }));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 20);
        assert!(seen[..10].iter().all(|c| (6..=8).contains(&c.len())));
        assert!(seen[10..].iter().all(|c| c.len() == 8));
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let mut mock = MockLinkRepository::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Backend("connection refused".into())));

        let result = allocator(mock).allocate(None).await;

        assert_eq!(
            result,
            Err(AllocationError::Store(StoreError::Backend(
                "connection refused".into()
            )))
        );
    }
}
