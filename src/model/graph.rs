// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::Serialize;

use super::ids::{EdgeId, NodeId};

/// Node/edge set for one selected course.
///
/// Nodes and edges keep insertion order. Inserting a node or edge whose id is already
/// present is a no-op, so callers can add shared prerequisites from several branches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, JsonSchema)]
pub struct PrereqGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    node_index: HashMap<NodeId, usize>,
    #[serde(skip)]
    edge_index: HashMap<EdgeId, usize>,
}

impl PrereqGraph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&GraphNode> {
        self.node_index.get(node_id).map(|&idx| &self.nodes[idx])
    }

    pub fn node_position(&self, node_id: &NodeId) -> Option<usize> {
        self.node_index.get(node_id).copied()
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&GraphEdge> {
        self.edge_index.get(edge_id).map(|&idx| &self.edges[idx])
    }

    /// Returns `false` when a node with the same id already exists.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.node_index.contains_key(node.id()) {
            return false;
        }
        self.node_index.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Returns `false` when an edge between the same endpoints already exists.
    pub fn insert_edge(&mut self, edge: GraphEdge) -> bool {
        if self.edge_index.contains_key(edge.id()) {
            return false;
        }
        self.edge_index.insert(edge.id().clone(), self.edges.len());
        self.edges.push(edge);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GraphNode {
    id: NodeId,
    #[serde(flatten)]
    kind: NodeKind,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl GraphNode {
    pub fn course(id: NodeId, role: CourseRole) -> Self {
        let label = id.as_str().to_owned();
        Self { id, kind: NodeKind::Course { role }, label, title: None }
    }

    pub fn junction(id: NodeId, junction: Junction) -> Self {
        let kind = match junction {
            Junction::And => NodeKind::And,
            Junction::Or => NodeKind::Or,
        };
        Self { id, kind, label: junction.label().to_owned(), title: None }
    }

    pub fn set_title<T: Into<String>>(&mut self, title: Option<T>) {
        self.title = title.map(Into::into);
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.kind, NodeKind::Course { role: CourseRole::Selected })
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.kind, NodeKind::And | NodeKind::Or)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    Course { role: CourseRole },
    And,
    Or,
}

/// Why a course node is part of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseRole {
    Selected,
    Prerequisite,
    Unlocks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    And,
    Or,
}

impl Junction {
    pub fn label(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Solid edges are hard dependencies; dashed edges contribute to a disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GraphEdge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    style: EdgeStyle,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId, style: EdgeStyle) -> Self {
        Self { id: EdgeId::between(&source, &target), source, target, style }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PositionedNode {
    #[serde(flatten)]
    node: GraphNode,
    layer: usize,
    position: Point,
}

impl PositionedNode {
    pub fn new(node: GraphNode, layer: usize, position: Point) -> Self {
        Self { node, layer, position }
    }

    pub fn node(&self) -> &GraphNode {
        &self.node
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// Layout output handed to renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, JsonSchema)]
pub struct PositionedGraph {
    nodes: Vec<PositionedNode>,
    edges: Vec<GraphEdge>,
}

impl PositionedGraph {
    pub fn new(nodes: Vec<PositionedNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.node().id().as_str() == node_id)
    }
}
