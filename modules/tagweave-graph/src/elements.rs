//! Render payload for the graph surface.
//!
//! The surface consumes cytoscape-style elements: one object per node and
//! per edge, each wrapped in a `data` envelope. Description strings back
//! the surface's tap/click callbacks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use tagweave_common::{TagEdge, TagNode};

use crate::aggregate::AggregateResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub size: u64,
    pub count: u64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub count: u64,
}

/// One graph-surface element. Serializes as `{"data": {...}}` with the
/// inner fields telling nodes and edges apart, which is what the surface
/// keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum GraphElement {
    Node { data: NodeData },
    Edge { data: EdgeData },
}

/// Build the element list the graph surface consumes: nodes first, then
/// edges.
pub fn elements(nodes: &[TagNode], edges: &[TagEdge]) -> Vec<GraphElement> {
    let mut out = Vec::with_capacity(nodes.len() + edges.len());
    for node in nodes {
        out.push(GraphElement::Node {
            data: NodeData {
                id: node.id.clone(),
                label: node.id.clone(),
                size: node.size,
                count: node.count,
                weight: node.weight,
            },
        });
    }
    for edge in edges {
        out.push(GraphElement::Edge {
            data: EdgeData {
                source: edge.source.clone(),
                target: edge.target.clone(),
                count: edge.count,
            },
        });
    }
    out
}

impl AggregateResult {
    /// Convenience wrapper over [`elements`] for a whole result.
    pub fn elements(&self) -> Vec<GraphElement> {
        elements(&self.nodes, &self.edges)
    }
}

/// Tap-callback text for a node. `weight_scale` is the factor the node's
/// weight was scaled by, so the text shows the raw mean sentiment.
pub fn describe_node(node: &TagNode, weight_scale: f64) -> String {
    format!(
        "#{} was posted {} times with an average sentiment of {:.2}",
        node.id,
        node.count,
        node.weight / weight_scale
    )
}

/// Tap-callback text for an edge.
pub fn describe_edge(edge: &TagEdge) -> String {
    format!(
        "{} and {} co-occurred {} times",
        edge.source.to_uppercase(),
        edge.target.to_uppercase(),
        edge.count
    )
}
