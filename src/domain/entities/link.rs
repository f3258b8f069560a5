//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// Only `click_count` and `last_clicked` change after creation, and only
/// through a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Store-assigned, increasing with insertion order.
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        click_count: i64,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
            click_count,
            last_clicked,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_code: String,
    pub long_url: String,
}

impl NewLink {
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            0,
            None,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.short_code, "abc123");
        assert_eq!(link.long_url, "https://example.com");
        assert_eq!(link.created_at, now);
        assert_eq!(link.click_count, 0);
        assert!(!link.was_clicked());
    }

    #[test]
    fn test_link_was_clicked() {
        let link = Link::new(
            2,
            "code".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            4,
            Some(Utc::now()),
        );
        assert!(link.was_clicked());
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink::new("xyz789", "https://rust-lang.org");

        assert_eq!(new_link.short_code, "xyz789");
        assert_eq!(new_link.long_url, "https://rust-lang.org");
    }
}
