use crate::core::errors::{ModelError, Result};
use crate::core::helpers::{new_id, now, push_unique, remove_id};
use crate::core::validation::Validate;
use crate::models::{Comment, Post, SortOrder, User};
use crate::threads::CommentThread;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn hashtag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?:^|[^\w&#])#(\w{1,64})").expect("Regex should compile")
    })
}

/// Hashtags in order of first appearance, lowercased, without the `#`.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    normalize_tags(
        hashtag_regex()
            .captures_iter(content)
            .map(|caps| caps[1].to_string()),
    )
}

/// Strips leading `#`, trims, lowercases and drops empties and repeats.
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

impl Post {
    pub fn new(author_id: &str, content: impl Into<String>) -> Self {
        let created_at = now();
        Self {
            id: new_id(),
            author_id: author_id.to_string(),
            content: content.into(),
            images: None,
            likes: Vec::new(),
            comments: Vec::new(),
            shares: 0,
            is_public: true,
            tags: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    /// Returns false when the user had already liked the post.
    pub fn like(&mut self, user_id: &str) -> bool {
        push_unique(&mut self.likes, user_id)
    }

    pub fn unlike(&mut self, user_id: &str) -> bool {
        remove_id(&mut self.likes, user_id)
    }

    pub fn share(&mut self) -> u64 {
        self.shares = self.shares.saturating_add(1);
        self.shares
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn engagement(&self) -> u64 {
        self.likes.len() as u64 + self.comments.len() as u64 + self.shares
    }

    pub fn thread(&self) -> CommentThread<'_> {
        CommentThread::new(self)
    }

    pub fn hashtags(&self) -> Vec<String> {
        let declared = self.tags.iter().flatten().cloned();
        normalize_tags(declared.chain(extract_hashtags(&self.content)))
    }

    /// Appends a comment after checking it belongs here and its parent exists.
    pub fn add_comment(&mut self, comment: Comment) -> Result<()> {
        comment.validate()?;
        if comment.post_id != self.id {
            return Err(ModelError::validation(
                "postId",
                format!("comment targets post {}, not {}", comment.post_id, self.id),
            ));
        }
        let thread = self.thread();
        if thread.contains(&comment.id) {
            return Err(ModelError::DuplicateId {
                kind: "comment",
                id: comment.id,
            });
        }
        if let Some(parent_id) = &comment.parent_id {
            if !thread.contains(parent_id) {
                return Err(ModelError::not_found("parent comment", parent_id.clone()));
            }
        }

        tracing::info!(
            post = %self.id,
            comment = %comment.id,
            reply = comment.is_reply(),
            "comment added"
        );
        self.comments.push(comment);
        Ok(())
    }

    /// Removes a comment together with its replies; returns what was removed.
    pub fn remove_comment(&mut self, comment_id: &str) -> Result<Vec<Comment>> {
        let doomed: HashSet<String> = self.thread().subtree_ids(comment_id)?.into_iter().collect();
        let (removed, kept): (Vec<Comment>, Vec<Comment>) = std::mem::take(&mut self.comments)
            .into_iter()
            .partition(|c| doomed.contains(&c.id));
        self.comments = kept;
        tracing::info!(
            post = %self.id,
            comment = comment_id,
            removed = removed.len(),
            "comment removed"
        );
        Ok(removed)
    }

    /// Public posts are visible to everyone; private ones to the author and
    /// the author's followers.
    pub fn is_visible_to(&self, viewer: Option<&User>) -> bool {
        if self.is_public {
            return true;
        }
        match viewer {
            Some(user) => user.id == self.author_id || user.follows(&self.author_id),
            None => false,
        }
    }
}

/// Orders posts in place. `Relevance` has no query to rank against here and
/// falls back to recency; see [`crate::search`] for ranked results.
pub fn sort_posts(posts: &mut [&Post], order: SortOrder) {
    match order {
        SortOrder::Recent | SortOrder::Relevance => {
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at))
        }
        SortOrder::Popular => posts.sort_by(|a, b| {
            b.engagement()
                .cmp(&a.engagement())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Home feed: the viewer's own posts and those of accounts they follow,
/// newest first, filtered by visibility.
pub fn feed_for<'a>(viewer: &User, posts: &'a [Post]) -> Vec<&'a Post> {
    let mut feed: Vec<&Post> = posts
        .iter()
        .filter(|p| p.author_id == viewer.id || viewer.follows(&p.author_id))
        .filter(|p| p.is_visible_to(Some(viewer)))
        .collect();
    sort_posts(&mut feed, SortOrder::Recent);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_are_extracted_in_order_and_deduplicated() {
        let tags = extract_hashtags("#Rust is great. Loving #rust and #serde_json! #Rust");
        assert_eq!(tags, vec!["rust", "serde_json"]);
    }

    #[test]
    fn anchors_and_entities_are_not_hashtags() {
        assert!(extract_hashtags("see page.html#section and &#39;").is_empty());
        assert_eq!(extract_hashtags("(#ok)"), vec!["ok"]);
    }

    #[test]
    fn normalize_strips_hash_and_blank_tags() {
        let tags = normalize_tags(vec![
            " #Travel ".into(),
            "travel".into(),
            "#".into(),
            "food".into(),
        ]);
        assert_eq!(tags, vec!["travel", "food"]);
    }
}
