// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;

use super::ident::{is_mermaid_ident, IdentAllocator};
use crate::model::{CourseRole, EdgeStyle, NodeId, NodeKind, PrereqGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MermaidExportError {
    MissingNode { node_id: NodeId },
    InvalidNodeLabel { node_id: NodeId, label: String },
}

impl fmt::Display for MermaidExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => {
                write!(f, "edge references missing node id: {node_id}")
            }
            Self::InvalidNodeLabel { node_id, label } => write!(
                f,
                "cannot export node label for {node_id}: contains a line break: {label:?}"
            ),
        }
    }
}

impl std::error::Error for MermaidExportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeShape {
    Rect,
    Stadium,
    Diamond,
}

impl NodeShape {
    fn of(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Course { role: CourseRole::Selected } => Self::Stadium,
            NodeKind::Course { .. } => Self::Rect,
            NodeKind::And | NodeKind::Or => Self::Diamond,
        }
    }

    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Rect => ("[", "]"),
            Self::Stadium => ("([", "])"),
            Self::Diamond => ("{", "}"),
        }
    }
}

fn quote_label(label: &str) -> Option<String> {
    if label.contains('\n') || label.contains('\r') {
        return None;
    }
    Some(format!("\"{}\"", label.replace('"', "#quot;")))
}

/// Export a synthesized graph as a top-down Mermaid `flowchart`.
///
/// Output is deterministic: nodes then edges, both in graph insertion order. Course nodes are
/// boxes (the selected course a stadium), junctions are diamonds, and edges into an OR
/// junction use the dotted `-.->` connector.
pub fn export_mermaid(graph: &PrereqGraph) -> Result<String, MermaidExportError> {
    let mut out = String::new();
    out.push_str("flowchart TD\n");

    let mut allocator = IdentAllocator::default();
    let mut idents = HashMap::<&NodeId, String>::with_capacity(graph.nodes().len());

    for node in graph.nodes() {
        let ident = allocator.allocate(node.id().as_str());
        debug_assert!(is_mermaid_ident(&ident));

        let label = quote_label(node.label()).ok_or_else(|| {
            MermaidExportError::InvalidNodeLabel {
                node_id: node.id().clone(),
                label: node.label().to_owned(),
            }
        })?;
        let (open, close) = NodeShape::of(node.kind()).delimiters();

        out.push_str(&ident);
        out.push_str(open);
        out.push_str(&label);
        out.push_str(close);
        out.push('\n');

        idents.insert(node.id(), ident);
    }

    for edge in graph.edges() {
        let from = idents
            .get(edge.source())
            .ok_or_else(|| MermaidExportError::MissingNode { node_id: edge.source().clone() })?;
        let to = idents
            .get(edge.target())
            .ok_or_else(|| MermaidExportError::MissingNode { node_id: edge.target().clone() })?;
        let op = match edge.style() {
            EdgeStyle::Solid => "-->",
            EdgeStyle::Dashed => "-.->",
        };

        out.push_str(from);
        out.push(' ');
        out.push_str(op);
        out.push(' ');
        out.push_str(to);
        out.push('\n');
    }

    Ok(out)
}
