// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Catalog documents hold normalized courses plus the reverse prerequisite index; graphs
//! are the per-selection node/edge sets derived from them.

pub mod catalog;
pub mod course;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod prereq;

pub use catalog::{CatalogDocument, ReversePrereqIndex};
pub use course::Course;
pub use graph::{
    CourseRole, EdgeStyle, GraphEdge, GraphNode, Junction, NodeKind, Point, PositionedGraph,
    PositionedNode, PrereqGraph,
};
pub use ids::{EdgeId, Id, IdError, NodeId};
pub use prereq::{split_compound, Prereq, PrereqGroup};
