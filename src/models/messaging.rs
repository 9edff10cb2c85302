use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{new_id, now};
use crate::core::validation::{
    traced, validate_id, validate_max_len, validate_non_empty, validate_text, validate_timestamps,
    validate_unique_ids, validate_url, validate_urls, Validate,
};
use crate::models::tags::MessageType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        sender_id: &str,
        receiver_id: &str,
        kind: MessageType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.into(),
            kind,
            is_read: false,
            attachments: None,
            created_at: now(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    fn has_attachments(&self) -> bool {
        self.attachments.as_ref().is_some_and(|a| !a.is_empty())
    }
}

impl Validate for Message {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        traced("message", &self.id, || {
            validate_id("id", &self.id)?;
            validate_id("senderId", &self.sender_id)?;
            validate_id("receiverId", &self.receiver_id)?;
            if self.sender_id == self.receiver_id {
                return Err(ModelError::SelfReference {
                    kind: "message",
                    id: self.id.clone(),
                });
            }
            validate_max_len("content", &self.content, policy.max_message_length)?;
            if let Some(attachments) = &self.attachments {
                validate_urls("attachments", attachments, policy.max_attachments_per_message)?;
            }
            match self.kind {
                MessageType::Text => validate_non_empty("content", &self.content),
                // Media messages may carry an empty caption but need something to show.
                MessageType::Image | MessageType::File if !self.has_attachments() => {
                    Err(ModelError::validation(
                        "attachments",
                        format!("a {} message needs an attachment", self.kind),
                    ))
                }
                MessageType::Image | MessageType::File => Ok(()),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn direct(user_a: &str, user_b: &str) -> Self {
        let created_at = now();
        Self {
            id: new_id(),
            participants: vec![user_a.to_string(), user_b.to_string()],
            last_message: None,
            is_group: false,
            group_name: None,
            group_image: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn group(name: impl Into<String>, participants: Vec<String>) -> Self {
        let created_at = now();
        Self {
            id: new_id(),
            participants,
            last_message: None,
            is_group: true,
            group_name: Some(name.into()),
            group_image: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// For a direct conversation, the participant that is not `user_id`.
    pub fn counterpart(&self, user_id: &str) -> Option<&str> {
        if self.is_group || !self.involves(user_id) {
            return None;
        }
        self.participants.iter().map(String::as_str).find(|p| *p != user_id)
    }

    /// Rejects an invalid message before it can become `lastMessage`.
    pub fn record_message(&mut self, message: Message) -> Result<()> {
        message.validate()?;
        self.check_message_members(&message)?;
        if message.created_at > self.updated_at {
            self.updated_at = message.created_at;
        }
        tracing::debug!(conversation = %self.id, message = %message.id, "last message updated");
        self.last_message = Some(message);
        Ok(())
    }

    /// Direct conversations check both ends; groups only the sender, since a
    /// group message's receiver slot may address the group itself.
    fn check_message_members(&self, message: &Message) -> Result<()> {
        let mut members = vec![("senderId", &message.sender_id)];
        if !self.is_group {
            members.push(("receiverId", &message.receiver_id));
        }
        for (field, id) in members {
            if !self.involves(id) {
                return Err(ModelError::validation(
                    field,
                    format!("{} is not a participant of conversation {}", id, self.id),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for Conversation {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        traced("conversation", &self.id, || {
            validate_id("id", &self.id)?;
            if self.participants.is_empty() {
                return Err(ModelError::validation("participants", "must not be empty"));
            }
            validate_unique_ids("participants", &self.participants)?;

            if self.is_group {
                if self.participants.len() < policy.min_group_participants {
                    return Err(ModelError::validation(
                        "participants",
                        format!(
                            "a group needs at least {} participants",
                            policy.min_group_participants
                        ),
                    ));
                }
                if let Some(name) = &self.group_name {
                    validate_text("groupName", name, policy.max_name_length)?;
                }
                if let Some(image) = &self.group_image {
                    validate_url("groupImage", image)?;
                }
            } else {
                if self.participants.len() != 2 {
                    return Err(ModelError::validation(
                        "participants",
                        "a direct conversation has exactly 2 participants",
                    ));
                }
                if self.group_name.is_some() || self.group_image.is_some() {
                    return Err(ModelError::validation(
                        "groupName",
                        "only group conversations carry a name or image",
                    ));
                }
            }

            if let Some(message) = &self.last_message {
                message.validate_with(policy)?;
                self.check_message_members(message)?;
            }
            validate_timestamps(&self.created_at, &self.updated_at)
        })
    }
}
