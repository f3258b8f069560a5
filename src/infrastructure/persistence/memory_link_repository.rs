//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;

/// Process-local link store.
///
/// Every operation runs under one mutex, which gives the same guarantees as
/// the database: inserts are check-and-insert in one critical section and
/// click counting is a single locked update. Data is lost on restart.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    links: HashMap<String, Link>,
    last_id: i64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("link store mutex poisoned".into()))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut state = self.state()?;

        if state.links.contains_key(&new_link.short_code) {
            return Err(StoreError::DuplicateCode(new_link.short_code));
        }

        state.last_id += 1;
        let link = Link::new(
            state.last_id,
            new_link.short_code.clone(),
            new_link.long_url,
            Utc::now(),
            0,
            None,
        );
        state.links.insert(new_link.short_code, link.clone());

        Ok(link)
    }

    async fn get(&self, short_code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.state()?.links.get(short_code).cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self.state()?.links.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn record_click(&self, short_code: &str) -> Result<Link, StoreError> {
        let mut state = self.state()?;
        let link = state
            .links
            .get_mut(short_code)
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))?;

        link.click_count += 1;
        link.last_clicked = Some(Utc::now());

        Ok(link.clone())
    }

    async fn delete(&self, short_code: &str) -> Result<(), StoreError> {
        self.state()?
            .links
            .remove(short_code)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))
    }
}
