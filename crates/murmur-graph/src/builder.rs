//! Graph builder for constructing the social graph from a dataset.
//!
//! The builder works in the same order the records depend on each other:
//! 1. Users
//! 2. Posts, with their author and viewer edges
//! 3. Comments, with their author and post edges
//!
//! References to unknown ids are skipped with a warning rather than failing
//! the build. A post whose author was skipped has no author in the graph,
//! and queries over it report an integrity error.

use crate::edge::EdgeKind;
use crate::graph::SocialGraph;
use murmur_core::Dataset;
use tracing::{info, warn};

/// Builds a SocialGraph from dataset records.
pub struct GraphBuilder {
    graph: SocialGraph,
    /// Number of references that did not resolve to a node.
    skipped: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: SocialGraph::new(),
            skipped: 0,
        }
    }

    /// Builds a graph from a complete dataset.
    pub fn from_dataset(dataset: &Dataset) -> SocialGraph {
        let mut builder = Self::new();
        builder.add_dataset(dataset);
        builder.build()
    }

    /// Adds every record of `dataset`.
    pub fn add_dataset(&mut self, dataset: &Dataset) {
        for (id, record) in &dataset.users {
            self.graph.add_user(record.to_user(id));
        }

        for (id, record) in &dataset.posts {
            self.graph.add_post(record.to_post(id));
            self.link(&record.author, id, EdgeKind::Authored);
            for viewer in &record.viewed_by {
                self.link(viewer, id, EdgeKind::Viewed);
            }
        }

        for (id, record) in &dataset.comments {
            self.graph.add_comment(record.to_comment(id));
            self.link(&record.author, id, EdgeKind::Authored);
            self.link(id, &record.post_id, EdgeKind::CommentedOn);
        }
    }

    fn link(&mut self, from: &str, to: &str, kind: EdgeKind) {
        if !self.graph.connect(from, to, kind) {
            warn!("Skipping {} edge {} -> {}: unknown node", kind, from, to);
            self.skipped += 1;
        }
    }

    /// Number of references skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> SocialGraph {
        let stats = self.graph.stats();
        info!(
            "Built graph: {} users, {} posts, {} comments, {} edges ({} skipped)",
            stats.users, stats.posts, stats.comments, stats.edges, self.skipped
        );
        self.graph
    }
}
