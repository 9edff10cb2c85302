use anyhow::Context;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_POST_LENGTH: usize = 5000;
pub const MAX_COMMENT_LENGTH: usize = 2000;
pub const MAX_MESSAGE_LENGTH: usize = 5000;
pub const MAX_IMAGES_PER_POST: usize = 10;
pub const MAX_ATTACHMENTS_PER_MESSAGE: usize = 10;
pub const MAX_TAGS_PER_POST: usize = 30;
pub const MAX_SEARCH_QUERY_LENGTH: usize = 200;
pub const MIN_GROUP_PARTICIPANTS: usize = 3;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Limits applied by [`crate::Validate`] and the form builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub min_username_length: usize,
    pub max_username_length: usize,
    pub min_password_length: usize,
    pub max_name_length: usize,
    pub max_bio_length: usize,
    pub max_post_length: usize,
    pub max_comment_length: usize,
    pub max_message_length: usize,
    pub max_images_per_post: usize,
    pub max_attachments_per_message: usize,
    pub max_tags_per_post: usize,
    pub max_search_query_length: usize,
    pub min_group_participants: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_username_length: MIN_USERNAME_LENGTH,
            max_username_length: MAX_USERNAME_LENGTH,
            min_password_length: MIN_PASSWORD_LENGTH,
            max_name_length: MAX_NAME_LENGTH,
            max_bio_length: MAX_BIO_LENGTH,
            max_post_length: MAX_POST_LENGTH,
            max_comment_length: MAX_COMMENT_LENGTH,
            max_message_length: MAX_MESSAGE_LENGTH,
            max_images_per_post: MAX_IMAGES_PER_POST,
            max_attachments_per_message: MAX_ATTACHMENTS_PER_MESSAGE,
            max_tags_per_post: MAX_TAGS_PER_POST,
            max_search_query_length: MAX_SEARCH_QUERY_LENGTH,
            min_group_participants: MIN_GROUP_PARTICIPANTS,
        }
    }
}

impl Policy {
    /// Defaults overridden by any `BORD_*` variable that is set.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: usize| -> anyhow::Result<usize> {
            match lookup(key) {
                Some(raw) => raw.trim().parse::<usize>().with_context(|| {
                    format!("{} must be a non-negative integer, got {:?}", key, raw)
                }),
                None => Ok(default),
            }
        };

        let policy = Self {
            min_username_length: read("BORD_MIN_USERNAME_LENGTH", MIN_USERNAME_LENGTH)?,
            max_username_length: read("BORD_MAX_USERNAME_LENGTH", MAX_USERNAME_LENGTH)?,
            min_password_length: read("BORD_MIN_PASSWORD_LENGTH", MIN_PASSWORD_LENGTH)?,
            max_post_length: read("BORD_MAX_POST_LENGTH", MAX_POST_LENGTH)?,
            max_comment_length: read("BORD_MAX_COMMENT_LENGTH", MAX_COMMENT_LENGTH)?,
            min_group_participants: read("BORD_MIN_GROUP_PARTICIPANTS", MIN_GROUP_PARTICIPANTS)?,
            ..Self::default()
        };

        if policy.min_username_length > policy.max_username_length {
            anyhow::bail!(
                "BORD_MIN_USERNAME_LENGTH ({}) exceeds BORD_MAX_USERNAME_LENGTH ({})",
                policy.min_username_length,
                policy.max_username_length
            );
        }
        // A group of two would be indistinguishable from a direct conversation.
        if policy.min_group_participants < 2 {
            anyhow::bail!("BORD_MIN_GROUP_PARTICIPANTS must be at least 2");
        }

        tracing::debug!(?policy, "validation policy loaded");
        Ok(policy)
    }
}
