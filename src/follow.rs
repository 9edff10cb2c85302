use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{now, push_unique, remove_id};
use crate::core::validation::Validate;
use crate::models::User;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Users keyed by id with a username index. Follow edges are stored on both
/// ends (`following` of the follower, `followers` of the followed) and the
/// directory keeps the two in step.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    users: HashMap<String, User>,
    usernames: HashMap<String, String>,
}

fn username_key(username: &str) -> String {
    username.to_lowercase()
}

fn touch(user: &mut User, stamp: DateTime<Utc>) {
    user.updated_at = stamp.max(user.updated_at);
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Adds a validated user. Ids are unique; usernames are unique ignoring
    /// case. Follow lists pointing at unknown users are dropped.
    pub fn insert(&mut self, mut user: User) -> Result<()> {
        user.validate()?;
        if self.users.contains_key(&user.id) {
            return Err(ModelError::DuplicateId {
                kind: "user",
                id: user.id,
            });
        }
        let key = username_key(&user.username);
        if self.usernames.contains_key(&key) {
            return Err(ModelError::UsernameTaken(user.username));
        }

        let known = |id: &String| self.users.contains_key(id);
        let followers_before = user.followers.len();
        let following_before = user.following.len();
        user.followers.retain(known);
        user.following.retain(known);
        if user.followers.len() != followers_before || user.following.len() != following_before {
            tracing::warn!(user = %user.id, "dropped follow edges to unknown users");
        }

        // Mirror the surviving edges onto the existing users.
        let stamp = now();
        for follower in &user.followers {
            if let Some(other) = self.users.get_mut(follower) {
                if push_unique(&mut other.following, &user.id) {
                    touch(other, stamp);
                }
            }
        }
        for followed in &user.following {
            if let Some(other) = self.users.get_mut(followed) {
                if push_unique(&mut other.followers, &user.id) {
                    touch(other, stamp);
                }
            }
        }

        tracing::info!(user = %user.id, username = %user.username, "user added to directory");
        self.usernames.insert(key, user.id.clone());
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn by_username(&self, username: &str) -> Option<&User> {
        self.usernames
            .get(&username_key(username))
            .and_then(|id| self.users.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn is_following(&self, follower_id: &str, following_id: &str) -> bool {
        self.get(follower_id).is_some_and(|u| u.follows(following_id))
    }

    /// Idempotent. Returns whether a new edge was created.
    pub fn follow(&mut self, follower_id: &str, following_id: &str) -> Result<bool> {
        self.check_pair(follower_id, following_id)?;

        let stamp = now();
        let added = match self.users.get_mut(follower_id) {
            Some(follower) => {
                let changed = push_unique(&mut follower.following, following_id);
                if changed {
                    touch(follower, stamp);
                }
                changed
            }
            None => false,
        };
        if let Some(followed) = self.users.get_mut(following_id) {
            if push_unique(&mut followed.followers, follower_id) {
                touch(followed, stamp);
            }
        }

        if added {
            tracing::info!(follower = follower_id, following = following_id, "followed");
        }
        Ok(added)
    }

    /// Returns whether an edge was removed.
    pub fn unfollow(&mut self, follower_id: &str, following_id: &str) -> Result<bool> {
        self.check_pair(follower_id, following_id)?;

        let stamp = now();
        let removed = match self.users.get_mut(follower_id) {
            Some(follower) => {
                let changed = remove_id(&mut follower.following, following_id);
                if changed {
                    touch(follower, stamp);
                }
                changed
            }
            None => false,
        };
        if let Some(followed) = self.users.get_mut(following_id) {
            if remove_id(&mut followed.followers, follower_id) {
                touch(followed, stamp);
            }
        }

        if removed {
            tracing::info!(follower = follower_id, following = following_id, "unfollowed");
        }
        Ok(removed)
    }

    pub fn followers(&self, user_id: &str) -> Result<Vec<&User>> {
        let user = self
            .get(user_id)
            .ok_or_else(|| ModelError::not_found("user", user_id))?;
        Ok(user.followers.iter().filter_map(|id| self.get(id)).collect())
    }

    pub fn followings(&self, user_id: &str) -> Result<Vec<&User>> {
        let user = self
            .get(user_id)
            .ok_or_else(|| ModelError::not_found("user", user_id))?;
        Ok(user.following.iter().filter_map(|id| self.get(id)).collect())
    }

    /// Users both `a` and `b` follow.
    pub fn mutual_followings(&self, a: &str, b: &str) -> Result<Vec<&User>> {
        let theirs = self
            .get(b)
            .ok_or_else(|| ModelError::not_found("user", b))?;
        Ok(self
            .followings(a)?
            .into_iter()
            .filter(|u| theirs.follows(&u.id))
            .collect())
    }

    /// Removes the user and scrubs its id from every follow list.
    pub fn remove(&mut self, user_id: &str) -> Result<User> {
        let user = self
            .users
            .remove(user_id)
            .ok_or_else(|| ModelError::not_found("user", user_id))?;
        self.usernames.remove(&username_key(&user.username));

        let stamp = now();
        for other in self.users.values_mut() {
            let scrubbed_follower = remove_id(&mut other.followers, user_id);
            let scrubbed_following = remove_id(&mut other.following, user_id);
            if scrubbed_follower || scrubbed_following {
                touch(other, stamp);
            }
        }
        tracing::info!(user = user_id, "user removed from directory");
        Ok(user)
    }

    fn check_pair(&self, follower_id: &str, following_id: &str) -> Result<()> {
        if follower_id == following_id {
            return Err(ModelError::SelfReference {
                kind: "user",
                id: follower_id.to_string(),
            });
        }
        for id in [follower_id, following_id] {
            if !self.users.contains_key(id) {
                return Err(ModelError::not_found("user", id));
            }
        }
        Ok(())
    }
}
