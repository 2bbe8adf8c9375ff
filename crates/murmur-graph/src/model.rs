//! Read-only query view over a social graph.
//!
//! Ranking and filtering only need a handful of reads. [`GraphModel`]
//! captures exactly those, so the queries do not depend on how the graph is
//! stored. [`SocialGraph`] is the stock implementation.

use crate::edge::EdgeKind;
use crate::error::{QueryError, Result};
use crate::graph::{NodeId, SocialGraph};
use murmur_core::NodeKind;
use serde_json::Value;

/// The reads the post queries are built on.
pub trait GraphModel {
    /// Handle to a post node.
    type Post: Copy;
    /// Handle to a user node.
    type User: Copy;

    /// All posts, in a stable order. Can be called repeatedly.
    fn posts(&self) -> impl Iterator<Item = Self::Post> + '_;

    /// The single user who authored `post`.
    ///
    /// Fails with [`QueryError::Integrity`] when the post has no author or
    /// more than one.
    fn author_of(&self, post: Self::Post) -> Result<Self::User>;

    /// Number of comment edges pointing at `post`, duplicates included.
    fn comment_count(&self, post: Self::Post) -> usize;

    fn view_count(&self, post: Self::Post) -> u64;

    fn text_of(&self, post: Self::Post) -> &str;

    /// A user attribute, or `None` when the user does not have it.
    fn attribute(&self, user: Self::User, key: &str) -> Option<&Value>;
}

impl GraphModel for SocialGraph {
    type Post = NodeId;
    type User = NodeId;

    fn posts(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.post_indexes()
    }

    fn author_of(&self, post: NodeId) -> Result<NodeId> {
        let authors: Vec<NodeId> = self
            .incoming(post, EdgeKind::Authored, NodeKind::User)
            .collect();
        match authors.as_slice() {
            [author] => Ok(*author),
            _ => Err(QueryError::Integrity {
                post: self.get(post).map(|n| n.id().to_string()).unwrap_or_default(),
                authors: authors.len(),
            }),
        }
    }

    fn comment_count(&self, post: NodeId) -> usize {
        self.incoming(post, EdgeKind::CommentedOn, NodeKind::Comment)
            .count()
    }

    fn view_count(&self, post: NodeId) -> u64 {
        self.post(post).map(|p| p.views).unwrap_or(0)
    }

    fn text_of(&self, post: NodeId) -> &str {
        self.post(post).map(|p| p.content.as_str()).unwrap_or("")
    }

    fn attribute(&self, user: NodeId, key: &str) -> Option<&Value> {
        self.user(user)?.attributes.get(key)
    }
}
