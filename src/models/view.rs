//! Visualization models: the flattened node/link graph served to the browser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entity::null_as_empty;

/// Role of a node in the flattened graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLabel {
    Parent,
    Child,
}

/// A node of the force-directed graph.
///
/// Two nodes are the same node when both title and label match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewNode {
    pub title: String,
    pub label: NodeLabel,
}

impl ViewNode {
    pub fn parent(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: NodeLabel::Parent,
        }
    }

    pub fn child(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: NodeLabel::Child,
        }
    }
}

/// A child → parent edge, as indices into [`ViewGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLink {
    pub source: usize,
    pub target: usize,
}

/// The `{nodes, links}` document consumed by the visualization client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewGraph {
    pub nodes: Vec<ViewNode>,
    pub links: Vec<ViewLink>,
}

/// One store record: a parent title with the titles of its children.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParentGroup {
    pub parent: String,
    #[serde(rename = "child", default, deserialize_with = "null_as_empty")]
    pub children: Vec<String>,
}

impl ParentGroup {
    pub fn new(parent: impl Into<String>, children: &[&str]) -> Self {
        Self {
            parent: parent.into(),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Flattens parent groups into a deduplicated [`ViewGraph`].
///
/// Parents are appended unconditionally, one node per group. A child title
/// already present as a child node anywhere in the graph reuses that node,
/// so a child listed under several parents gets one node and several links.
/// Nodes keep first-seen order and links keep per-parent, per-child order.
///
/// A child candidate can never equal a parent node (labels differ), so the
/// index only tracks child titles.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: ViewGraph,
    child_index: HashMap<String, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parent group.
    pub fn push_group(&mut self, group: ParentGroup) -> &mut Self {
        let target = self.push_node(ViewNode::parent(group.parent));

        for child in group.children {
            let source = match self.child_index.get(&child) {
                Some(&index) => index,
                None => {
                    let index = self.push_node(ViewNode::child(child.clone()));
                    self.child_index.insert(child, index);
                    index
                }
            };
            self.graph.links.push(ViewLink { source, target });
        }

        self
    }

    pub fn build(self) -> ViewGraph {
        self.graph
    }

    fn push_node(&mut self, node: ViewNode) -> usize {
        self.graph.nodes.push(node);
        self.graph.nodes.len() - 1
    }
}

impl FromIterator<ParentGroup> for ViewGraph {
    fn from_iter<I: IntoIterator<Item = ParentGroup>>(groups: I) -> Self {
        let mut builder = GraphBuilder::new();
        for group in groups {
            builder.push_group(group);
        }
        builder.build()
    }
}
