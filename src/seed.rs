//! Demo presentations for a fresh deployment.

use crate::models::Presentation;
use crate::storage::{PresentationStore, StoreError};

const DEMO_EMBED_URL: &str =
    "https://www.canva.com/design/DAG_coZQi0U/q0EOCfdZHzs2jal89EFjqA/view?embed";
const DEMO_CHANNEL_ID: i64 = -1003814950604;

pub fn demo_presentations() -> Vec<Presentation> {
    [
        ("math-g5-lesson1", "Бөлшектер (5-сынып)", "5-сынып"),
        ("math-g6-lesson1", "Пропорция (6-сынып)", "6-сынып"),
        ("math-g5-lesson2", "Ондық бөлшектер (5-сынып)", "5-сынып"),
    ]
    .into_iter()
    .map(|(id, title, group)| Presentation {
        id: id.to_string(),
        title: title.to_string(),
        group_name: group.to_string(),
        embed_url: DEMO_EMBED_URL.to_string(),
        channel_id: DEMO_CHANNEL_ID,
        topic_id: None,
    })
    .collect()
}

/// Upsert the demo presentations. Returns how many were written.
pub async fn seed(store: &dyn PresentationStore) -> Result<usize, StoreError> {
    let presentations = demo_presentations();
    for p in &presentations {
        store.put(p).await?;
        tracing::info!(action = "seed", presentation_id = %p.id, title = %p.title, "Presentation added");
    }
    Ok(presentations.len())
}
