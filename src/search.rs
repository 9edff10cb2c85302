//! In-memory matching for [`SearchForm`]. A record matches when at least one
//! query term occurs in it; relevance is the number of matching terms.

use crate::core::errors::Result;
use crate::core::validation::Validate;
use crate::follow::Directory;
use crate::forms::SearchForm;
use crate::models::{Post, SearchScope, SortOrder, User};
use std::cmp::Reverse;

#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub users: Vec<&'a User>,
    pub posts: Vec<&'a Post>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.posts.len()
    }
}

fn user_score(user: &User, terms: &[String]) -> usize {
    let haystack = format!(
        "{} {} {}",
        user.username.to_lowercase(),
        user.first_name.to_lowercase(),
        user.last_name.to_lowercase()
    );
    terms.iter().filter(|t| haystack.contains(t.as_str())).count()
}

fn post_score(post: &Post, terms: &[String]) -> usize {
    let content = post.content.to_lowercase();
    let tags = post.hashtags();
    terms
        .iter()
        .filter(|t| content.contains(t.as_str()) || tags.iter().any(|tag| tag == *t))
        .count()
}

/// Posts the viewer may not see are never returned.
pub fn search<'a>(
    form: &SearchForm,
    directory: &'a Directory,
    posts: &'a [Post],
    viewer: Option<&User>,
) -> Result<SearchResults<'a>> {
    form.validate()?;
    let terms = form.terms();
    let mut results = SearchResults::default();

    if matches!(form.scope, SearchScope::Users | SearchScope::All) {
        let mut scored: Vec<(usize, &User)> = directory
            .iter()
            .map(|u| (user_score(u, &terms), u))
            .filter(|(score, _)| *score > 0)
            .collect();
        match form.sort_by {
            SortOrder::Relevance => {
                scored.sort_by_key(|(score, u)| (Reverse(*score), u.username.to_lowercase()))
            }
            SortOrder::Recent => scored.sort_by_key(|(_, u)| Reverse(u.created_at)),
            SortOrder::Popular => scored
                .sort_by_key(|(_, u)| (Reverse(u.followers.len()), u.username.to_lowercase())),
        }
        results.users = scored.into_iter().map(|(_, u)| u).collect();
    }

    if matches!(form.scope, SearchScope::Posts | SearchScope::All) {
        let mut scored: Vec<(usize, &Post)> = posts
            .iter()
            .filter(|p| p.is_visible_to(viewer))
            .map(|p| (post_score(p, &terms), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        match form.sort_by {
            SortOrder::Relevance => {
                scored.sort_by_key(|(score, p)| (Reverse(*score), Reverse(p.created_at)))
            }
            SortOrder::Recent => scored.sort_by_key(|(_, p)| Reverse(p.created_at)),
            SortOrder::Popular => {
                scored.sort_by_key(|(_, p)| (Reverse(p.engagement()), Reverse(p.created_at)))
            }
        }
        results.posts = scored.into_iter().map(|(_, p)| p).collect();
    }

    tracing::debug!(
        query = %form.query,
        scope = %form.scope,
        users = results.users.len(),
        posts = results.posts.len(),
        "search finished"
    );
    Ok(results)
}
