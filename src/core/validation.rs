use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate_with(&self, policy: &Policy) -> Result<()>;

    fn validate(&self) -> Result<()> {
        self.validate_with(&Policy::default())
    }
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Regex should compile")
    })
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("Regex should compile"))
}

fn username_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Regex should compile"))
}

pub fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(field, "must not be empty"));
    }
    Ok(())
}

pub fn validate_id(field: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ModelError::validation(field, "id must not be empty"));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(ModelError::validation(field, "id must not contain whitespace"));
    }
    Ok(())
}

/// Length is counted in chars, not bytes.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(ModelError::validation(
            field,
            format!("{} characters exceeds the limit of {}", len, max),
        ));
    }
    Ok(())
}

pub fn validate_text(field: &str, value: &str, max: usize) -> Result<()> {
    validate_non_empty(field, value)?;
    validate_max_len(field, value, max)
}

pub fn validate_username(field: &str, username: &str, policy: &Policy) -> Result<()> {
    let len = username.chars().count();
    if len < policy.min_username_length || len > policy.max_username_length {
        return Err(ModelError::validation(
            field,
            format!(
                "must be {}-{} characters",
                policy.min_username_length, policy.max_username_length
            ),
        ));
    }
    if !username_regex().is_match(username) {
        return Err(ModelError::validation(
            field,
            "may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email(field: &str, email: &str) -> Result<()> {
    if !email_regex().is_match(email) {
        return Err(ModelError::validation(field, "is not a valid email address"));
    }
    Ok(())
}

pub fn validate_url(field: &str, url: &str) -> Result<()> {
    if !url_regex().is_match(url) {
        return Err(ModelError::validation(field, format!("{:?} is not an http(s) URL", url)));
    }
    Ok(())
}

pub fn validate_urls(field: &str, urls: &[String], max: usize) -> Result<()> {
    if urls.len() > max {
        return Err(ModelError::validation(
            field,
            format!("{} entries exceeds the limit of {}", urls.len(), max),
        ));
    }
    urls.iter().try_for_each(|url| validate_url(field, url))
}

/// Every id non-empty, no repeats.
pub fn validate_unique_ids(field: &str, ids: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        validate_id(field, id)?;
        if !seen.insert(id.as_str()) {
            return Err(ModelError::validation(field, format!("duplicate id {}", id)));
        }
    }
    Ok(())
}

pub fn validate_not_listed(field: &str, ids: &[String], own_id: &str) -> Result<()> {
    if ids.iter().any(|id| id == own_id) {
        return Err(ModelError::validation(field, "must not contain the record's own id"));
    }
    Ok(())
}

pub fn validate_timestamps(created_at: &DateTime<Utc>, updated_at: &DateTime<Utc>) -> Result<()> {
    if updated_at < created_at {
        return Err(ModelError::validation("updatedAt", "precedes createdAt"));
    }
    Ok(())
}

/// Runs `check` and emits a debug event naming the record when it fails.
pub(crate) fn traced<T>(
    kind: &'static str,
    id: &str,
    check: impl FnOnce() -> Result<T>,
) -> Result<T> {
    check().inspect_err(|err| tracing::debug!(kind, id, error = %err, "record rejected"))
}
