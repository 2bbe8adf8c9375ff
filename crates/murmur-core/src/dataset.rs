//! Raw dataset records.
//!
//! A dataset is three keyed collections (users, posts, comments) as exported
//! by the ingestion step. The records reference each other by id; turning
//! those references into graph edges is the graph builder's job.
//!
//! Collections keep their file order, which becomes the graph's iteration
//! order and therefore the tie-break order for rankings.

use crate::attributes::Attributes;
use crate::error::{DatasetError, Result};
use crate::node::{Comment, Post, User};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A user as it appears in the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub attributes: Attributes,
    /// Ids of posts written by the user. Informational; edges come from posts.
    #[serde(default)]
    pub posts: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub posts_read: Vec<String>,
}

/// A post as it appears in the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRecord {
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub viewed_by: Vec<String>,
    /// Explicit view count. Falls back to `viewed_by.len()` when absent.
    #[serde(default)]
    pub views: Option<u64>,
}

/// A comment as it appears in the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub post_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub creation_time: Option<String>,
}

/// The full input to graph construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: IndexMap<String, UserRecord>,
    #[serde(default)]
    pub posts: IndexMap<String, PostRecord>,
    #[serde(default)]
    pub comments: IndexMap<String, CommentRecord>,
}

impl Dataset {
    /// Parses a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&json)?;
        debug!(
            "Loaded {} users, {} posts, {} comments from {}",
            dataset.users.len(),
            dataset.posts.len(),
            dataset.comments.len(),
            path.display()
        );
        Ok(dataset)
    }
}

impl UserRecord {
    /// Converts the record into a graph node payload.
    pub fn to_user(&self, id: &str) -> User {
        User::new(id, self.username.clone()).with_attributes(self.attributes.clone())
    }
}

impl PostRecord {
    /// The effective view count.
    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(self.viewed_by.len() as u64)
    }

    pub fn to_post(&self, id: &str) -> Post {
        Post {
            id: id.to_string(),
            content: self.content.clone(),
            views: self.view_count(),
            creation_time: self.creation_time.clone(),
        }
    }
}

impl CommentRecord {
    pub fn to_comment(&self, id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            content: self.content.clone(),
            creation_time: self.creation_time.clone(),
        }
    }
}
