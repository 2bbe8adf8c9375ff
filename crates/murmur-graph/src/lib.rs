//! Murmur Graph - Post ranking and filtering
//!
//! This crate holds the social interaction graph and the two queries run
//! over it: ranking posts by importance and filtering posts by content and
//! author attributes.
//!
//! # Architecture
//!
//! The graph uses petgraph internally. Queries never touch petgraph
//! directly; they are written against the [`GraphModel`] trait, which
//! [`SocialGraph`] implements.
//!
//! # Example
//!
//! ```
//! use murmur_core::{Attributes, Post, User};
//! use murmur_graph::{filter_posts_by_graph, rank_by, EdgeKind, SocialGraph};
//!
//! let mut graph = SocialGraph::new();
//! graph.add_user(User::new("u1", "ann").with_attribute("gender", "female"));
//! graph.add_post(Post::new("p1", "hello world").with_views(10));
//! graph.connect("u1", "p1", EdgeKind::Authored);
//!
//! let top = rank_by(&graph, "views", 0.5, 1).unwrap();
//! assert_eq!(top[0].score, 10.0);
//!
//! let posts = filter_posts_by_graph(&graph, ["hello"], &Attributes::new()).unwrap();
//! assert_eq!(posts.len(), 1);
//! ```

mod builder;
mod edge;
mod error;
mod export;
mod filter;
mod graph;
mod model;
mod ranking;
mod text;

pub use builder::GraphBuilder;
pub use edge::{Edge, EdgeKind, GraphEdge};
pub use error::{QueryError, Result};
pub use export::{ExportNode, GraphExport, ImportantPost};
pub use filter::{filter_posts_by_graph, post_texts, KeywordMatcher, MatchMode, PostFilter};
pub use graph::{GraphStats, NodeId, SocialGraph};
pub use model::GraphModel;
pub use ranking::{rank, rank_by, score, RankPolicy, RankedPost};
pub use text::{aggregate_text, word_frequencies, DEFAULT_STOPWORDS};
