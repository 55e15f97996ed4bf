//! Presentation storage.
//!
//! Handlers and the access pipeline only see [`PresentationStore`]; the
//! Redis backend is used in production, the in-memory backend in tests and
//! local runs without Redis.

pub mod memory;
pub mod presentation;

pub use memory::MemoryPresentationStore;
pub use presentation::RedisPresentationStore;

use crate::models::Presentation;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value access to presentations, keyed by presentation ID.
#[async_trait]
pub trait PresentationStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Presentation>, StoreError>;

    /// All presentations, ordered by group name then title.
    async fn list(&self) -> Result<Vec<Presentation>, StoreError>;

    /// Insert or replace a presentation.
    async fn put(&self, presentation: &Presentation) -> Result<(), StoreError>;
}

/// Sort presentations the way the dashboard lists them.
pub(crate) fn sort_for_listing(presentations: &mut [Presentation]) {
    presentations.sort_by(|a, b| {
        a.group_name
            .cmp(&b.group_name)
            .then_with(|| a.title.cmp(&b.title))
    });
}
