//! Serializable snapshot of the graph for external visualizers.
//!
//! The export carries every node with its kind, every typed edge, and
//! optionally the ranked posts to highlight.

use crate::edge::GraphEdge;
use crate::graph::{NodeId, SocialGraph};
use crate::ranking::{RankPolicy, RankedPost};
use murmur_core::NodeKind;
use serde::{Deserialize, Serialize};

/// A node in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
}

/// A highlighted post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantPost {
    pub id: String,
    pub score: f64,
}

/// Graph snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<RankPolicy>,
    /// Ranked posts, most important first.
    #[serde(default)]
    pub important: Vec<ImportantPost>,
}

impl GraphExport {
    /// Adds the ranking result to highlight.
    pub fn with_important(
        mut self,
        graph: &SocialGraph,
        policy: RankPolicy,
        ranked: &[RankedPost<NodeId>],
    ) -> Self {
        self.policy = Some(policy);
        self.important = ranked
            .iter()
            .filter_map(|r| {
                graph.get(r.post).map(|node| ImportantPost {
                    id: node.id().to_string(),
                    score: r.score,
                })
            })
            .collect();
        self
    }
}

impl SocialGraph {
    /// Snapshots the whole graph.
    pub fn export(&self) -> GraphExport {
        GraphExport {
            nodes: self
                .nodes()
                .map(|node| ExportNode {
                    id: node.id().to_string(),
                    kind: node.kind(),
                    label: node.label().to_string(),
                })
                .collect(),
            edges: self.export_edges(),
            policy: None,
            important: Vec::new(),
        }
    }
}
