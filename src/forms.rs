//! Input shapes submitted by the client, with the checks and sanitisation
//! applied before they become records.

use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{new_id, now, sanitize_rich_text, sanitize_text};
use crate::core::query_params::{get_string, parse_query_params};
use crate::core::validation::{
    validate_email, validate_max_len, validate_non_empty, validate_text, validate_url,
    validate_urls, validate_username, Validate,
};
use crate::models::{Post, SearchScope, SortOrder, User};
use crate::posts::{extract_hashtags, normalize_tags};
use serde::{Deserialize, Serialize};
use std::fmt;

fn rejected<T>(form: &'static str, check: impl FnOnce() -> Result<T>) -> Result<T> {
    check().inspect_err(|err| tracing::debug!(form, error = %err, "form rejected"))
}

fn clean_plain(field: &'static str, value: &str) -> String {
    let cleaned = sanitize_text(value.trim());
    if cleaned != value.trim() {
        tracing::warn!(field, "markup stripped from plain-text input");
    }
    cleaned
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Validate for LoginForm {
    fn validate_with(&self, _policy: &Policy) -> Result<()> {
        rejected("login", || {
            validate_email("email", self.email.trim())?;
            validate_non_empty("password", &self.password)
        })
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl Validate for RegisterForm {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        rejected("register", || {
            validate_username("username", self.username.trim(), policy)?;
            validate_email("email", self.email.trim())?;
            if self.password.chars().count() < policy.min_password_length {
                return Err(ModelError::validation(
                    "password",
                    format!("must be at least {} characters", policy.min_password_length),
                ));
            }
            if self.password.trim().is_empty() {
                return Err(ModelError::validation("password", "must not be blank"));
            }
            if self.password != self.confirm_password {
                return Err(ModelError::validation("confirmPassword", "does not match password"));
            }
            validate_text("firstName", self.first_name.trim(), policy.max_name_length)?;
            validate_text("lastName", self.last_name.trim(), policy.max_name_length)
        })
    }
}

impl RegisterForm {
    /// Builds the public profile record. The password never leaves the form.
    pub fn into_user(self, policy: &Policy) -> Result<User> {
        self.validate_with(policy)?;

        let first_name = clean_plain("firstName", &self.first_name);
        let last_name = clean_plain("lastName", &self.last_name);
        // Names made only of markup are empty once cleaned.
        validate_non_empty("firstName", &first_name)?;
        validate_non_empty("lastName", &last_name)?;

        let created_at = now();
        let user = User {
            id: new_id(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            first_name,
            last_name,
            bio: None,
            avatar: None,
            cover_image: None,
            location: None,
            website: None,
            followers: Vec::new(),
            following: Vec::new(),
            is_verified: false,
            created_at,
            updated_at: created_at,
        };
        tracing::info!(user = %user.id, username = %user.username, "registration accepted");
        Ok(user)
    }
}

/// Partial profile edit. An absent field is left alone; an empty string
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
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
}

impl Validate for ProfileForm {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        rejected("profile", || {
            if let Some(name) = &self.first_name {
                validate_text("firstName", name, policy.max_name_length)?;
            }
            if let Some(name) = &self.last_name {
                validate_text("lastName", name, policy.max_name_length)?;
            }
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
                match url.as_deref().map(str::trim) {
                    Some("") | None => {}
                    Some(url) => validate_url(field, url)?,
                }
            }
            Ok(())
        })
    }
}

impl ProfileForm {
    pub fn is_empty(&self) -> bool {
        self == &ProfileForm::default()
    }

    /// Applies the edit; returns whether anything changed.
    pub fn apply(&self, user: &mut User, policy: &Policy) -> Result<bool> {
        self.validate_with(policy)?;

        let before = user.clone();
        if let Some(name) = &self.first_name {
            user.first_name = clean_plain("firstName", name);
        }
        if let Some(name) = &self.last_name {
            user.last_name = clean_plain("lastName", name);
        }
        let text = |value: &Option<String>, field: &'static str, target: &mut Option<String>| {
            if let Some(value) = value {
                let cleaned = clean_plain(field, value);
                *target = if cleaned.is_empty() { None } else { Some(cleaned) };
            }
        };
        text(&self.bio, "bio", &mut user.bio);
        text(&self.location, "location", &mut user.location);

        // URLs were shape-checked above; escaping them would corrupt query strings.
        let url = |value: &Option<String>, target: &mut Option<String>| {
            if let Some(value) = value {
                let trimmed = value.trim();
                *target = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
            }
        };
        url(&self.avatar, &mut user.avatar);
        url(&self.cover_image, &mut user.cover_image);
        url(&self.website, &mut user.website);

        if *user == before {
            return Ok(false);
        }
        user.updated_at = now().max(user.updated_at);
        if let Err(err) = user.validate_with(policy) {
            *user = before;
            return Err(err);
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostForm {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Validate for CreatePostForm {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        rejected("create_post", || {
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
            }
            Ok(())
        })
    }
}

impl CreatePostForm {
    /// Sanitises the content and merges declared tags with hashtags found in
    /// the text. `tags` stays absent when neither source yields any.
    pub fn into_post(self, author_id: &str, policy: &Policy) -> Result<Post> {
        self.validate_with(policy)?;

        let content = sanitize_rich_text(&self.content);
        validate_non_empty("content", &content)?;

        let declared = self.tags.clone().unwrap_or_default();
        let mut tags = normalize_tags(declared.into_iter().chain(extract_hashtags(&content)));
        tags.truncate(policy.max_tags_per_post);

        let mut post = Post::new(author_id, content);
        post.images = self.images;
        post.is_public = self.is_public;
        post.tags = if tags.is_empty() && self.tags.is_none() {
            None
        } else {
            Some(tags)
        };

        post.validate_with(policy)?;
        tracing::info!(post = %post.id, author = author_id, "post created");
        Ok(post)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    pub query: String,
    #[serde(rename = "type")]
    pub scope: SearchScope,
    pub sort_by: SortOrder,
}

impl Validate for SearchForm {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        rejected("search", || {
            validate_text("query", &self.query, policy.max_search_query_length)
        })
    }
}

impl SearchForm {
    pub fn new(query: impl Into<String>, scope: SearchScope, sort_by: SortOrder) -> Self {
        Self {
            query: query.into(),
            scope,
            sort_by,
        }
    }

    /// Reads `?q=&type=&sortBy=`. A missing `type` means `all` and a missing
    /// `sortBy` means `relevance`; a present but unknown value is an error.
    pub fn from_query(uri: &str) -> Result<Self> {
        let params = parse_query_params(uri);
        let query = get_string(&params, "q")
            .ok_or_else(|| ModelError::validation("q", "search query is required"))?;
        let scope = match get_string(&params, "type") {
            Some(raw) => raw.parse()?,
            None => SearchScope::All,
        };
        let sort_by = match get_string(&params, "sortBy") {
            Some(raw) => raw.parse()?,
            None => SortOrder::Relevance,
        };

        let form = Self::new(query.trim(), scope, sort_by);
        form.validate()?;
        Ok(form)
    }

    pub fn to_query(&self) -> String {
        format!(
            "q={}&type={}&sortBy={}",
            urlencoding::encode(&self.query),
            self.scope,
            self.sort_by
        )
    }

    /// Lowercased whitespace-separated terms; a leading `#` or `@` is dropped.
    pub fn terms(&self) -> Vec<String> {
        self.query
            .split_whitespace()
            .map(|t| t.trim_start_matches(&['#', '@'][..]).to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}
