use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::validation::{
    traced, validate_id, validate_text, validate_timestamps, validate_unique_ids, validate_urls,
    Validate,
};
use crate::models::comment::Comment;
use crate::threads::CommentThread;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub likes: Vec<String>,
    /// Ordered oldest first, owned by the post.
    pub comments: Vec<Comment>,
    pub shares: u64,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for Post {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        traced("post", &self.id, || {
            validate_id("id", &self.id)?;
            validate_id("authorId", &self.author_id)?;
            validate_text("content", &self.content, policy.max_post_length)?;
            if let Some(images) = &self.images {
                validate_urls("images", images, policy.max_images_per_post)?;
            }
            if let Some(tags) = &self.tags {
                if tags.len() > policy.max_tags_per_post {
                    return Err(ModelError::validation(
                        "tags",
                        format!(
                            "{} tags exceeds the limit of {}",
                            tags.len(),
                            policy.max_tags_per_post
                        ),
                    ));
                }
                if tags.iter().any(|tag| tag.trim().is_empty()) {
                    return Err(ModelError::validation("tags", "tags must not be empty"));
                }
            }
            validate_unique_ids("likes", &self.likes)?;
            validate_timestamps(&self.created_at, &self.updated_at)?;

            for comment in &self.comments {
                comment.validate_with(policy)?;
            }
            CommentThread::new(self).validate()
        })
    }
}
