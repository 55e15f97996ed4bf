//! In-process presentation store.

use super::{sort_for_listing, PresentationStore, StoreError};
use crate::models::Presentation;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryPresentationStore {
    presentations: RwLock<HashMap<String, Presentation>>,
}

impl MemoryPresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentations(presentations: impl IntoIterator<Item = Presentation>) -> Self {
        let map = presentations
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            presentations: RwLock::new(map),
        }
    }
}

#[async_trait]
impl PresentationStore for MemoryPresentationStore {
    async fn get(&self, id: &str) -> Result<Option<Presentation>, StoreError> {
        Ok(self.presentations.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Presentation>, StoreError> {
        let mut all: Vec<Presentation> = self.presentations.read().await.values().cloned().collect();
        sort_for_listing(&mut all);
        Ok(all)
    }

    async fn put(&self, presentation: &Presentation) -> Result<(), StoreError> {
        self.presentations
            .write()
            .await
            .insert(presentation.id.clone(), presentation.clone());
        Ok(())
    }
}
