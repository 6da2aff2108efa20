use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a user-authored item.
///
/// `creator_id` is set once at creation from the authenticated caller and is
/// never altered afterwards; `updated_at` moves forward on every successful
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub creator_id: i64,
    pub title: String,
    pub description: String,
    pub is_private: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `creator_id`, with generated id and
    /// timestamps.
    pub fn new(creator_id: i64, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creator_id,
            title: draft.title,
            description: draft.description,
            is_private: draft.is_private,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields a caller supplies when creating a post. The owner and the
/// backend-assigned fields are never part of it.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub is_private: bool,
    pub tags: Vec<String>,
}

/// Partial update of a post. `None` leaves the stored value unchanged;
/// `Some` replaces it, including `Some(String::new())` for the description.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    /// Merge the present fields into `post`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(description) = self.description {
            post.description = description;
        }
        if let Some(is_private) = self.is_private {
            post.is_private = is_private;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
    }
}

/// One page of posts visible to a caller. `total` counts every visible post,
/// ignoring the pagination window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub posts: Vec<Post>,
    pub total: u64,
}
