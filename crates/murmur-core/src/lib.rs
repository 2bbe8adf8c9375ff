//! Murmur Core - Social graph data model
//!
//! This crate defines the entities that make up a social-media interaction
//! graph (users, posts, comments), the open attribute bags attached to users,
//! and the raw dataset records the graph is built from.
//!
//! # Example
//!
//! ```
//! use murmur_core::{Attributes, Post, User};
//!
//! let user = User::new("u1", "ann").with_attribute("gender", "female");
//! let post = Post::new("p1", "hello world").with_views(10);
//!
//! assert_eq!(user.attributes.get("gender").and_then(|v| v.as_str()), Some("female"));
//! assert!(Attributes::new().get("gender").is_none());
//! assert_eq!(post.views, 10);
//! ```

mod attributes;
mod dataset;
mod error;
mod node;

pub use attributes::Attributes;
pub use dataset::{CommentRecord, Dataset, PostRecord, UserRecord};
pub use error::{DatasetError, Result};
pub use node::{Comment, NodeKind, Post, SocialNode, User};
