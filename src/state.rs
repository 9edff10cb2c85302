use crate::config::Policy;
use crate::core::errors::{ModelError, Result};
use crate::core::validation::Validate;
use crate::envelope::ApiResponse;
use crate::models::User;
use serde::{Deserialize, Serialize};

/// Client session snapshot. `is_authenticated` always mirrors whether
/// `user` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Starts a request. A previous error is cleared; the user is kept.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn signed_in(&mut self, user: User) {
        tracing::info!(user = %user.id, "session signed in");
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
        self.error = None;
    }

    pub fn signed_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.id, "session signed out");
        }
        self.is_authenticated = false;
        self.is_loading = false;
        self.error = None;
    }

    /// Ends a request with an error. The session itself is unchanged.
    pub fn failed(&mut self, error: impl Into<String>) {
        let error = error.into();
        tracing::debug!(%error, "session request failed");
        self.is_loading = false;
        self.error = Some(error);
    }

    /// Folds the outcome of a login or profile request into the snapshot.
    pub fn apply_response(&mut self, response: ApiResponse<User>) {
        match response.into_result() {
            Ok(Some(user)) => self.signed_in(user),
            Ok(None) => self.failed("response carried no user"),
            Err(ModelError::Rejected(error)) => self.failed(error),
            Err(err) => self.failed(err.to_string()),
        }
    }
}

impl Validate for AppState {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        if self.is_authenticated != self.user.is_some() {
            return Err(ModelError::validation(
                "isAuthenticated",
                "must be true exactly when a user is present",
            ));
        }
        if let Some(user) = &self.user {
            user.validate_with(policy)?;
        }
        Ok(())
    }
}
