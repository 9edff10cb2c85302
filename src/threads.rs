//! Reply trees over a post's comments.
//!
//! Comments live in the post's `Vec` and refer to their parent by id; the
//! thread is a borrowed index over that arena, never an owning tree.

use crate::core::errors::{ModelError, Result};
use crate::models::{Comment, Post};
use std::collections::HashMap;

pub struct CommentThread<'a> {
    post_id: &'a str,
    comments: &'a [Comment],
    index: HashMap<&'a str, usize>,
}

impl<'a> CommentThread<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self::from_comments(&post.id, &post.comments)
    }

    pub fn from_comments(post_id: &'a str, comments: &'a [Comment]) -> Self {
        let mut index = HashMap::with_capacity(comments.len());
        for (pos, comment) in comments.iter().enumerate() {
            index.entry(comment.id.as_str()).or_insert(pos);
        }
        Self {
            post_id,
            comments,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'a Comment> {
        self.index.get(id).map(|&pos| &self.comments[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Top-level comments in post order.
    pub fn roots(&self) -> Vec<&'a Comment> {
        self.comments.iter().filter(|c| c.parent_id.is_none()).collect()
    }

    /// Direct replies to `id` in post order.
    pub fn replies(&self, id: &str) -> Vec<&'a Comment> {
        self.comments
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(id))
            .collect()
    }

    /// Parent chain of `id`, nearest first.
    ///
    /// The walk is bounded by the number of comments on the post; running past
    /// that bound means the chain loops.
    pub fn ancestors(&self, id: &str) -> Result<Vec<&'a Comment>> {
        let start = self
            .get(id)
            .ok_or_else(|| ModelError::not_found("comment", id))?;

        let mut chain = Vec::new();
        let mut current = start;
        while let Some(parent_id) = current.parent_id.as_deref() {
            if chain.len() >= self.comments.len() || parent_id == start.id {
                return Err(ModelError::CycleDetected(start.id.clone()));
            }
            let parent = self
                .get(parent_id)
                .ok_or_else(|| ModelError::not_found("parent comment", parent_id))?;
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// 0 for a top-level comment.
    pub fn depth(&self, id: &str) -> Result<usize> {
        self.ancestors(id).map(|chain| chain.len())
    }

    /// Ids of `id` and everything that replies to it, transitively.
    pub fn subtree_ids(&self, id: &str) -> Result<Vec<String>> {
        if !self.contains(id) {
            return Err(ModelError::not_found("comment", id));
        }
        let mut collected = vec![id.to_string()];
        let mut cursor = 0;
        while cursor < collected.len() {
            // Bounded like `ancestors`: a looped thread would otherwise grow forever.
            if collected.len() > self.comments.len() {
                return Err(ModelError::CycleDetected(id.to_string()));
            }
            let parent = collected[cursor].clone();
            collected.extend(self.replies(&parent).into_iter().map(|c| c.id.clone()));
            cursor += 1;
        }
        Ok(collected)
    }

    /// Tree-wide checks: unique ids, every comment on this post, every
    /// parent present, no parent chain loops.
    pub fn validate(&self) -> Result<()> {
        if self.index.len() != self.comments.len() {
            let mut seen = std::collections::HashSet::new();
            if let Some(dup) = self.comments.iter().find(|c| !seen.insert(c.id.as_str())) {
                return Err(ModelError::DuplicateId {
                    kind: "comment",
                    id: dup.id.clone(),
                });
            }
        }

        for comment in self.comments {
            if comment.post_id != self.post_id {
                return Err(ModelError::validation(
                    "postId",
                    format!(
                        "comment {} belongs to post {}, not {}",
                        comment.id, comment.post_id, self.post_id
                    ),
                ));
            }
            if comment.parent_id.as_deref() == Some(comment.id.as_str()) {
                return Err(ModelError::SelfReference {
                    kind: "comment",
                    id: comment.id.clone(),
                });
            }
        }

        for comment in self.comments {
            self.ancestors(&comment.id)?;
        }
        Ok(())
    }
}
