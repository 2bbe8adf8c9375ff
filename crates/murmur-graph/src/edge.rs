//! Edge types for the social graph.
//!
//! Edges are directed and typed. The kind is set explicitly when the edge
//! is added, and always agrees with the endpoint types:
//!
//! - `Authored`: User → Post, User → Comment
//! - `CommentedOn`: Comment → Post
//! - `Viewed`: User → Post

use serde::{Deserialize, Serialize};

/// The type of relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// User wrote a post or a comment.
    Authored,

    /// Comment was left on a post.
    CommentedOn,

    /// User viewed a post.
    Viewed,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Authored => "authored",
            Self::CommentedOn => "commented_on",
            Self::Viewed => "viewed",
        };
        write!(f, "{}", s)
    }
}

/// An edge in the social graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(kind: EdgeKind) -> Self {
        Self { kind }
    }
}

/// A simplified edge for graph export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}
