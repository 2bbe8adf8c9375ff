//! Node types for the social graph.
//!
//! Every vertex in the graph is a [`SocialNode`]: a user, a post, or a
//! comment. Relationships between them live on graph edges, not here.

use crate::attributes::Attributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    User,
    Post,
    Comment,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        };
        write!(f, "{}", s)
    }
}

/// A member of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Demographic attributes used by author filters.
    pub attributes: Attributes,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    /// How many times the post was viewed. Read-only for queries.
    pub views: u64,
    pub creation_time: Option<String>,
}

impl Post {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            views: 0,
            creation_time: None,
        }
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn with_creation_time(mut self, time: impl Into<String>) -> Self {
        self.creation_time = Some(time.into());
        self
    }
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub creation_time: Option<String>,
}

impl Comment {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            creation_time: None,
        }
    }

    pub fn with_creation_time(mut self, time: impl Into<String>) -> Self {
        self.creation_time = Some(time.into());
        self
    }
}

/// A vertex of the social graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SocialNode {
    User(User),
    Post(Post),
    Comment(Comment),
}

impl SocialNode {
    /// The node's unique identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::User(u) => &u.id,
            Self::Post(p) => &p.id,
            Self::Comment(c) => &c.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::User(_) => NodeKind::User,
            Self::Post(_) => NodeKind::Post,
            Self::Comment(_) => NodeKind::Comment,
        }
    }

    /// A short human-readable label (username for users, id otherwise).
    pub fn label(&self) -> &str {
        match self {
            Self::User(u) if !u.username.is_empty() => &u.username,
            _ => self.id(),
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Self::Post(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Self::Comment(c) => Some(c),
            _ => None,
        }
    }
}

impl From<User> for SocialNode {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Post> for SocialNode {
    fn from(post: Post) -> Self {
        Self::Post(post)
    }
}

impl From<Comment> for SocialNode {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}
