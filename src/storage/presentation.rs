//! Presentation Redis operations.
//!
//! Redis key patterns:
//! - `presentation:{id}` — presentation data (JSON)
//! - `presentations` — set of all presentation IDs

use super::{sort_for_listing, PresentationStore, StoreError};
use crate::models::Presentation;
use async_trait::async_trait;
use redis::AsyncCommands;

const INDEX_KEY: &str = "presentations";

fn presentation_key(id: &str) -> String {
    format!("presentation:{}", id)
}

/// Store a presentation and add it to the index set.
pub async fn store_presentation<C>(
    con: &mut C,
    presentation: &Presentation,
) -> Result<(), StoreError>
where
    C: AsyncCommands,
{
    let json = serde_json::to_string(presentation)?;

    con.set::<_, _, ()>(presentation_key(&presentation.id), json)
        .await?;
    con.sadd::<_, _, ()>(INDEX_KEY, &presentation.id).await?;

    Ok(())
}

/// Get a presentation by ID.
pub async fn get_presentation<C>(con: &mut C, id: &str) -> Result<Option<Presentation>, StoreError>
where
    C: AsyncCommands,
{
    let json: Option<String> = con.get(presentation_key(id)).await?;

    match json {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

/// List all indexed presentations, ordered by group name then title.
///
/// Index entries whose record has disappeared are skipped.
pub async fn list_presentations<C>(con: &mut C) -> Result<Vec<Presentation>, StoreError>
where
    C: AsyncCommands,
{
    let ids: Vec<String> = con.smembers(INDEX_KEY).await?;

    let mut presentations = Vec::with_capacity(ids.len());
    for id in &ids {
        match get_presentation(&mut *con, id).await? {
            Some(p) => presentations.push(p),
            None => tracing::warn!(presentation_id = %id, "Indexed presentation missing"),
        }
    }

    sort_for_listing(&mut presentations);
    Ok(presentations)
}

/// [`PresentationStore`] backed by Redis.
#[derive(Clone)]
pub struct RedisPresentationStore {
    client: redis::Client,
}

impl RedisPresentationStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl PresentationStore for RedisPresentationStore {
    async fn get(&self, id: &str) -> Result<Option<Presentation>, StoreError> {
        let mut con = self.connection().await?;
        get_presentation(&mut con, id).await
    }

    async fn list(&self) -> Result<Vec<Presentation>, StoreError> {
        let mut con = self.connection().await?;
        list_presentations(&mut con).await
    }

    async fn put(&self, presentation: &Presentation) -> Result<(), StoreError> {
        let mut con = self.connection().await?;
        store_presentation(&mut con, presentation).await
    }
}
