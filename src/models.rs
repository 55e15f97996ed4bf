//! Domain and storage models.
//!
//! Storage models are serialized to JSON for Redis.

use serde::{Deserialize, Serialize};

// ============================================================================
// Presentation Models
// ============================================================================

/// A gated presentation as stored in Redis.
///
/// Access is decided by live membership in `channel_id`; announcements go to
/// the same channel, inside `topic_id` when the channel is a forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub id: String,
    pub title: String,
    pub group_name: String,
    pub embed_url: String,
    pub channel_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
}

/// Presentations bucketed by `group_name`, in first-seen order.
///
/// Input is expected to be sorted by group then title (as returned by
/// `PresentationStore::list`).
pub fn group_presentations(presentations: Vec<Presentation>) -> Vec<(String, Vec<Presentation>)> {
    let mut groups: Vec<(String, Vec<Presentation>)> = Vec::new();
    for p in presentations {
        match groups.last_mut() {
            Some((name, items)) if *name == p.group_name => items.push(p),
            _ => groups.push((p.group_name.clone(), vec![p])),
        }
    }
    groups
}

// ============================================================================
// Auth Models
// ============================================================================

/// Identity carried by a verified Telegram Login Widget assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
}
