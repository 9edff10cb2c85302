use crate::config::Policy;
use crate::core::errors::Result;
use crate::core::validation::{
    traced, validate_email, validate_id, validate_max_len, validate_not_listed, validate_text,
    validate_timestamps, validate_unique_ids, validate_url, validate_username, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn follows(&self, user_id: &str) -> bool {
        self.following.iter().any(|id| id == user_id)
    }

    pub fn is_followed_by(&self, user_id: &str) -> bool {
        self.followers.iter().any(|id| id == user_id)
    }
}

impl Validate for User {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        traced("user", &self.id, || {
            validate_id("id", &self.id)?;
            validate_username("username", &self.username, policy)?;
            validate_email("email", &self.email)?;
            validate_text("firstName", &self.first_name, policy.max_name_length)?;
            validate_text("lastName", &self.last_name, policy.max_name_length)?;
            if let Some(bio) = &self.bio {
                validate_max_len("bio", bio, policy.max_bio_length)?;
            }
            if let Some(location) = &self.location {
                validate_max_len("location", location, policy.max_name_length)?;
            }
            for (field, url) in [
                ("avatar", &self.avatar),
                ("coverImage", &self.cover_image),
                ("website", &self.website),
            ] {
                if let Some(url) = url {
                    validate_url(field, url)?;
                }
            }
            validate_unique_ids("followers", &self.followers)?;
            validate_unique_ids("following", &self.following)?;
            validate_not_listed("followers", &self.followers, &self.id)?;
            validate_not_listed("following", &self.following, &self.id)?;
            validate_timestamps(&self.created_at, &self.updated_at)
        })
    }
}
