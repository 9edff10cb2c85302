use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{new_id, now};
use crate::core::validation::{traced, validate_id, Validate};
use crate::models::tags::NotificationType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Recipient.
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// The user whose action triggered the notification.
    pub from_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationType, user_id: &str, from_user_id: &str) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            kind,
            from_user_id: from_user_id.to_string(),
            post_id: None,
            message_id: None,
            is_read: false,
            created_at: now(),
        }
    }

    pub fn for_post(mut self, post_id: &str) -> Self {
        self.post_id = Some(post_id.to_string());
        self
    }

    pub fn for_message(mut self, message_id: &str) -> Self {
        self.message_id = Some(message_id.to_string());
        self
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

impl Validate for Notification {
    fn validate_with(&self, _policy: &Policy) -> Result<()> {
        traced("notification", &self.id, || {
            validate_id("id", &self.id)?;
            validate_id("userId", &self.user_id)?;
            validate_id("fromUserId", &self.from_user_id)?;
            if self.user_id == self.from_user_id {
                return Err(ModelError::SelfReference {
                    kind: "notification",
                    id: self.id.clone(),
                });
            }
            if let Some(post_id) = &self.post_id {
                validate_id("postId", post_id)?;
            }
            if let Some(message_id) = &self.message_id {
                validate_id("messageId", message_id)?;
            }

            match self.kind {
                NotificationType::Like | NotificationType::Comment if self.post_id.is_none() => {
                    Err(ModelError::validation(
                        "postId",
                        format!("a {} notification references a post", self.kind),
                    ))
                }
                NotificationType::Message if self.message_id.is_none() => {
                    Err(ModelError::validation(
                        "messageId",
                        "a message notification references a message",
                    ))
                }
                NotificationType::Follow if self.post_id.is_some() || self.message_id.is_some() => {
                    Err(ModelError::validation(
                        "postId",
                        "a follow notification carries no related record",
                    ))
                }
                _ => Ok(()),
            }
        })
    }
}
