//! Core graph data structure.
//!
//! The SocialGraph wraps petgraph and adds an id index plus an ordered list
//! of post nodes. Post order is insertion order and is what rankings use to
//! break ties, so it must stay stable for the graph's lifetime.

use crate::edge::{Edge, EdgeKind, GraphEdge};
use murmur_core::{NodeKind, Post, SocialNode, User};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// The social interaction graph.
///
/// Users, posts and comments are nodes; authorship, commenting and viewing
/// are typed edges. Once built, the graph is only read by queries.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: DiGraph<SocialNode, Edge>,

    /// Maps string IDs to graph node indexes.
    id_index: HashMap<String, NodeId>,

    /// Post nodes in insertion order.
    post_index: Vec<NodeId>,
}

impl SocialGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph.
    ///
    /// If a node with the same id already exists its payload is replaced in
    /// place and its edges are kept.
    pub fn add_node(&mut self, node: impl Into<SocialNode>) -> NodeId {
        let node = node.into();
        let is_post = node.kind() == NodeKind::Post;

        if let Some(&index) = self.id_index.get(node.id()) {
            warn!("Duplicate node id '{}', replacing previous {}", node.id(), self.graph[index].kind());
            let was_post = self.graph[index].kind() == NodeKind::Post;
            match (was_post, is_post) {
                (true, false) => self.post_index.retain(|&idx| idx != index),
                (false, true) => self.post_index.push(index),
                _ => {}
            }
            self.graph[index] = node;
            return index;
        }

        let id = node.id().to_string();
        let index = self.graph.add_node(node);
        self.id_index.insert(id, index);
        if is_post {
            self.post_index.push(index);
        }
        index
    }

    pub fn add_user(&mut self, user: User) -> NodeId {
        self.add_node(user)
    }

    pub fn add_post(&mut self, post: Post) -> NodeId {
        self.add_node(post)
    }

    pub fn add_comment(&mut self, comment: murmur_core::Comment) -> NodeId {
        self.add_node(comment)
    }

    /// Adds an edge between two nodes. Repeated edges are kept.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) {
        self.graph.add_edge(from, to, edge);
    }

    /// Adds an edge between two nodes given by string id.
    ///
    /// Returns false (and adds nothing) if either endpoint is unknown.
    pub fn connect(&mut self, from: &str, to: &str, kind: EdgeKind) -> bool {
        match (self.get_index(from), self.get_index(to)) {
            (Some(from), Some(to)) => {
                self.add_edge(from, to, Edge::new(kind));
                true
            }
            _ => false,
        }
    }

    /// Gets a node by its string ID.
    pub fn get_by_id(&self, id: &str) -> Option<&SocialNode> {
        let index = self.id_index.get(id)?;
        self.graph.node_weight(*index)
    }

    /// Gets a node by its graph index.
    pub fn get(&self, index: NodeId) -> Option<&SocialNode> {
        self.graph.node_weight(index)
    }

    /// Gets the node index for a string ID.
    pub fn get_index(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn user(&self, index: NodeId) -> Option<&User> {
        self.get(index).and_then(SocialNode::as_user)
    }

    pub fn post(&self, index: NodeId) -> Option<&Post> {
        self.get(index).and_then(SocialNode::as_post)
    }

    /// Iterates over post indexes in insertion order.
    pub fn post_indexes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.post_index.iter().copied()
    }

    /// Sources of incoming edges of `kind` whose source node is of `source_kind`.
    ///
    /// Repeated edges yield the same source more than once.
    pub fn incoming(
        &self,
        index: NodeId,
        kind: EdgeKind,
        source_kind: NodeKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .edges_directed(index, Direction::Incoming)
            .filter(move |edge_ref| edge_ref.weight().kind == kind)
            .map(|edge_ref| edge_ref.source())
            .filter(move |source| {
                self.graph
                    .node_weight(*source)
                    .is_some_and(|node| node.kind() == source_kind)
            })
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of posts.
    pub fn post_count(&self) -> usize {
        self.post_index.len()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &SocialNode> {
        self.graph.node_weights()
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Returns all edges with source and target IDs for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .map(|edge_ref| GraphEdge {
                source: self.graph[edge_ref.source()].id().to_string(),
                target: self.graph[edge_ref.target()].id().to_string(),
                kind: edge_ref.weight().kind,
            })
            .collect()
    }
}

/// Graph statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
    pub edges: usize,
}

impl SocialGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let count = |kind: NodeKind| self.nodes().filter(|n| n.kind() == kind).count();
        GraphStats {
            users: count(NodeKind::User),
            posts: self.post_count(),
            comments: count(NodeKind::Comment),
            edges: self.edge_count(),
        }
    }
}
