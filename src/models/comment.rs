use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{new_id, now, push_unique, remove_id};
use crate::core::validation::{
    traced, validate_id, validate_text, validate_timestamps, validate_unique_ids, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment owned by a post. `parent_id` links replies into a tree; see
/// [`crate::threads::CommentThread`] for the checks that span comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub likes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: &str, author_id: &str, content: impl Into<String>) -> Self {
        let created_at = now();
        Self {
            id: new_id(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: content.into(),
            likes: Vec::new(),
            parent_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn reply_to(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn like(&mut self, user_id: &str) -> bool {
        push_unique(&mut self.likes, user_id)
    }

    pub fn unlike(&mut self, user_id: &str) -> bool {
        remove_id(&mut self.likes, user_id)
    }
}

impl Validate for Comment {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        traced("comment", &self.id, || {
            validate_id("id", &self.id)?;
            validate_id("postId", &self.post_id)?;
            validate_id("authorId", &self.author_id)?;
            validate_text("content", &self.content, policy.max_comment_length)?;
            validate_unique_ids("likes", &self.likes)?;
            if let Some(parent_id) = &self.parent_id {
                validate_id("parentId", parent_id)?;
                if parent_id == &self.id {
                    return Err(ModelError::SelfReference {
                        kind: "comment",
                        id: self.id.clone(),
                    });
                }
            }
            validate_timestamps(&self.created_at, &self.updated_at)
        })
    }
}
