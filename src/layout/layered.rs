// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    EdgeId, GraphEdge, NodeId, Point, PositionedGraph, PositionedNode, PrereqGraph,
};

/// Smallest spacing accepted by [`LayoutConfig`]; keeps neighbouring positions distinct.
pub const MIN_SPACING: f64 = 1.0;

fn clamp_spacing(spacing: f64, current: f64) -> f64 {
    if spacing.is_finite() {
        spacing.max(MIN_SPACING)
    } else {
        current
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    node_spacing: f64,
    rank_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 180.0,
            rank_spacing: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal distance between neighbouring nodes of one layer.
    ///
    /// Values below [`MIN_SPACING`] are raised to it; NaN and infinities are ignored.
    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = clamp_spacing(spacing, self.node_spacing);
        self
    }

    /// Vertical distance between layers, clamped like the node spacing.
    pub fn with_rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = clamp_spacing(spacing, self.rank_spacing);
        self
    }

    pub fn node_spacing(&self) -> f64 {
        self.node_spacing
    }

    pub fn rank_spacing(&self) -> f64 {
        self.rank_spacing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    layers: Vec<Vec<NodeId>>,
    node_placements: BTreeMap<NodeId, NodePlacement>,
    reversed_edges: Vec<EdgeId>,
    anchor_layer: usize,
}

impl GraphLayout {
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn node_placements(&self) -> &BTreeMap<NodeId, NodePlacement> {
        &self.node_placements
    }

    pub fn placement(&self, node_id: &NodeId) -> Option<&NodePlacement> {
        self.node_placements.get(node_id)
    }

    /// Edges laid out against their direction to break a cycle.
    pub fn reversed_edges(&self) -> &[EdgeId] {
        &self.reversed_edges
    }

    /// Layer of the selected course; it is drawn at `y = 0`.
    pub fn anchor_layer(&self) -> usize {
        self.anchor_layer
    }

    /// Attaches positions to the nodes of the graph this layout was computed for.
    ///
    /// Nodes the layout does not know about (a different graph) are dropped.
    pub fn apply(&self, graph: &PrereqGraph) -> PositionedGraph {
        let nodes = graph
            .nodes()
            .iter()
            .filter_map(|node| {
                let placement = self.placement(node.id())?;
                Some(PositionedNode::new(node.clone(), placement.layer, placement.position))
            })
            .collect();
        PositionedGraph::new(nodes, graph.edges().to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePlacement {
    layer: usize,
    index_in_layer: usize,
    position: Point,
}

impl NodePlacement {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index_in_layer(&self) -> usize {
        self.index_in_layer
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownNode { edge_id: EdgeId, endpoint: EdgeEndpoint, node_id: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode { edge_id, endpoint, node_id } => {
                let endpoint = match endpoint {
                    EdgeEndpoint::Source => "source",
                    EdgeEndpoint::Target => "target",
                };
                write!(f, "edge {edge_id} references unknown {endpoint} node {node_id}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Node-index adjacency for the acyclic version of the graph.
struct Dag {
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

/// Resolves edge endpoints to node indices (insertion order). Self-loops are dropped.
fn index_edges(graph: &PrereqGraph) -> Result<Vec<(usize, usize, &GraphEdge)>, LayoutError> {
    let mut indexed = Vec::with_capacity(graph.edges().len());
    for edge in graph.edges() {
        let source = graph.node_position(edge.source()).ok_or_else(|| LayoutError::UnknownNode {
            edge_id: edge.id().clone(),
            endpoint: EdgeEndpoint::Source,
            node_id: edge.source().clone(),
        })?;
        let target = graph.node_position(edge.target()).ok_or_else(|| LayoutError::UnknownNode {
            edge_id: edge.id().clone(),
            endpoint: EdgeEndpoint::Target,
            node_id: edge.target().clone(),
        })?;
        if source != target {
            indexed.push((source, target, edge));
        }
    }
    Ok(indexed)
}

/// Edges leaving `selected` that close a cycle back to it.
///
/// Reversing these keeps every prerequisite path on the near side of the selected course.
fn cycle_edges_from(selected: usize, edges: &[(usize, usize, &GraphEdge)]) -> Vec<usize> {
    let mut incoming = BTreeMap::<usize, Vec<usize>>::new();
    for (source, target, _) in edges {
        incoming.entry(*target).or_default().push(*source);
    }

    let mut reaches_selected = BTreeSet::from([selected]);
    let mut pending = vec![selected];
    while let Some(node) = pending.pop() {
        for &source in incoming.get(&node).into_iter().flatten() {
            if reaches_selected.insert(source) {
                pending.push(source);
            }
        }
    }

    edges
        .iter()
        .enumerate()
        .filter(|(_, (source, target, _))| {
            *source == selected && reaches_selected.contains(target)
        })
        .map(|(edge_idx, _)| edge_idx)
        .collect()
}

/// Finds the edges to reverse so the graph becomes acyclic.
///
/// Cycles through the selected course are broken on its outgoing side first. Whatever
/// cycles remain are broken by a depth-first search in node insertion order. The search is
/// iterative so deep chains cannot overflow the stack.
fn find_back_edges(
    node_count: usize,
    edges: &[(usize, usize, &GraphEdge)],
    selected: Option<usize>,
) -> BTreeSet<usize> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut back_edges = selected
        .map(|selected| cycle_edges_from(selected, edges))
        .unwrap_or_default()
        .into_iter()
        .collect::<BTreeSet<_>>();

    let mut outgoing = vec![Vec::<(usize, usize)>::new(); node_count];
    for (edge_idx, (source, target, _)) in edges.iter().enumerate() {
        if back_edges.contains(&edge_idx) {
            outgoing[*target].push((*source, edge_idx));
        } else {
            outgoing[*source].push((*target, edge_idx));
        }
    }

    let mut marks = vec![Mark::Unvisited; node_count];

    for root in 0..node_count {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnStack;
        let mut stack = vec![(root, 0usize)];

        while let Some((node, next_child)) = stack.last_mut() {
            let node = *node;
            let Some(&(target, edge_idx)) = outgoing[node].get(*next_child) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            *next_child += 1;

            match marks[target] {
                Mark::OnStack => {
                    back_edges.insert(edge_idx);
                }
                Mark::Unvisited => {
                    marks[target] = Mark::OnStack;
                    stack.push((target, 0));
                }
                Mark::Done => {}
            }
        }
    }

    back_edges
}

fn build_dag(
    node_count: usize,
    edges: &[(usize, usize, &GraphEdge)],
    back_edges: &BTreeSet<usize>,
) -> Dag {
    let mut successors = vec![Vec::new(); node_count];
    let mut predecessors = vec![Vec::new(); node_count];
    for (edge_idx, (source, target, _)) in edges.iter().enumerate() {
        let (from, to) =
            if back_edges.contains(&edge_idx) { (*target, *source) } else { (*source, *target) };
        successors[from].push(to);
        predecessors[to].push(from);
    }
    Dag { successors, predecessors }
}

/// Kahn's algorithm; among ready nodes the earliest inserted goes first.
fn topo_sort_nodes(dag: &Dag) -> Vec<usize> {
    let node_count = dag.successors.len();
    let mut indegree = dag.predecessors.iter().map(Vec::len).collect::<Vec<_>>();
    let mut ready = (0..node_count).filter(|&idx| indegree[idx] == 0).collect::<BTreeSet<_>>();

    let mut topo = Vec::with_capacity(node_count);
    while let Some(next) = ready.pop_first() {
        topo.push(next);
        for &to in &dag.successors[next] {
            indegree[to] = indegree[to].saturating_sub(1);
            if indegree[to] == 0 {
                ready.insert(to);
            }
        }
    }
    topo
}

/// Longest-path layering, then every node with successors is pulled down to sit directly
/// above its nearest successor.
fn assign_layers(topo: &[usize], dag: &Dag) -> Vec<usize> {
    let mut layers = vec![0usize; dag.successors.len()];

    for &from in topo {
        let from_layer = layers[from];
        for &to in &dag.successors[from] {
            layers[to] = layers[to].max(from_layer + 1);
        }
    }

    for &node in topo.iter().rev() {
        if let Some(nearest) = dag.successors[node].iter().map(|&to| layers[to]).min() {
            layers[node] = layers[node].max(nearest.saturating_sub(1));
        }
    }

    layers
}

fn barycenter(neighbors: &[usize], positions: &[Option<usize>]) -> Option<(usize, usize)> {
    let (sum, count) = neighbors
        .iter()
        .filter_map(|&neighbor| positions[neighbor])
        .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1));
    (count > 0).then_some((sum, count))
}

/// Stable sort by barycenter of the neighbours in the adjacent, already-ordered layer.
///
/// A node with no neighbour there uses its current index instead, so it keeps roughly its
/// place rather than being pushed to one end.
fn sort_layer_by_barycenter(
    layer_nodes: &mut Vec<usize>,
    adjacent_positions: &[Option<usize>],
    neighbors: &[Vec<usize>],
) {
    let mut keyed = layer_nodes
        .iter()
        .enumerate()
        .map(|(current, &node)| {
            let key = barycenter(&neighbors[node], adjacent_positions).unwrap_or((current, 1));
            (node, key)
        })
        .collect::<Vec<_>>();

    keyed.sort_by(|(_, (sum_a, count_a)), (_, (sum_b, count_b))| {
        // Compare sum_a/count_a vs sum_b/count_b without floats.
        let left = (*sum_a as u128) * (*count_b as u128);
        let right = (*sum_b as u128) * (*count_a as u128);
        left.cmp(&right)
    });

    *layer_nodes = keyed.into_iter().map(|(node, _)| node).collect();
}

fn positions_of(layer: &[usize], node_count: usize) -> Vec<Option<usize>> {
    let mut positions = vec![None; node_count];
    for (idx, &node) in layer.iter().enumerate() {
        positions[node] = Some(idx);
    }
    positions
}

/// Deterministic layered layout for a synthesized prerequisite graph.
///
/// - Breaks cycles by reversing edges (layout only; edges are not changed). A course that
///   both requires and unlocks a neighbour gives up the unlock edge, so the prerequisite
///   side stays above the selected course.
/// - Assigns layers by longest path, tightened so prerequisites sit right above what they feed.
/// - Orders each layer with one downward and one upward barycenter sweep, starting from
///   insertion order.
/// - Centers every layer on `x = 0` and places the selected course's layer at `y = 0`, so
///   prerequisites get negative `y` and unlocked courses positive `y`.
pub fn layout_graph(
    graph: &PrereqGraph,
    config: &LayoutConfig,
) -> Result<GraphLayout, LayoutError> {
    let node_count = graph.nodes().len();
    let edges = index_edges(graph)?;

    let selected = graph.nodes().iter().position(|node| node.is_selected());
    let back_edges = find_back_edges(node_count, &edges, selected);
    let reversed_edges =
        back_edges.iter().map(|&edge_idx| edges[edge_idx].2.id().clone()).collect::<Vec<_>>();
    if !reversed_edges.is_empty() {
        tracing::warn!(
            reversed = reversed_edges.len(),
            "prerequisite graph contains a cycle; laying out reversed edges against their direction"
        );
    }

    let dag = build_dag(node_count, &edges, &back_edges);
    let topo = topo_sort_nodes(&dag);
    let node_layers = assign_layers(&topo, &dag);

    let max_layer = node_layers.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::<usize>::new(); max_layer + 1];
    for (node, &layer) in node_layers.iter().enumerate() {
        layers[layer].push(node);
    }

    for layer_idx in 1..layers.len() {
        let above = positions_of(&layers[layer_idx - 1], node_count);
        sort_layer_by_barycenter(&mut layers[layer_idx], &above, &dag.predecessors);
    }
    for layer_idx in (0..layers.len().saturating_sub(1)).rev() {
        let below = positions_of(&layers[layer_idx + 1], node_count);
        sort_layer_by_barycenter(&mut layers[layer_idx], &below, &dag.successors);
    }

    let anchor_layer = selected.map(|node| node_layers[node]).unwrap_or(0);

    let mut node_placements = BTreeMap::<NodeId, NodePlacement>::new();
    for (layer, nodes) in layers.iter().enumerate() {
        let y = (layer as f64 - anchor_layer as f64) * config.rank_spacing;
        let half_width = (nodes.len() as f64 - 1.0) / 2.0;
        for (index_in_layer, &node) in nodes.iter().enumerate() {
            let x = (index_in_layer as f64 - half_width) * config.node_spacing;
            node_placements.insert(
                graph.nodes()[node].id().clone(),
                NodePlacement { layer, index_in_layer, position: Point { x, y } },
            );
        }
    }

    let layers = layers
        .into_iter()
        .map(|nodes| nodes.into_iter().map(|node| graph.nodes()[node].id().clone()).collect())
        .collect::<Vec<Vec<NodeId>>>();

    tracing::debug!(nodes = node_count, layers = layers.len(), anchor_layer, "laid out graph");

    Ok(GraphLayout { layers, node_placements, reversed_edges, anchor_layer })
}
