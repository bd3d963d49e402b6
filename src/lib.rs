// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Course Atlas: course-catalog prerequisite normalization and graph layout.
//!
//! The offline half ([`pipeline`]) turns a raw, inconsistently shaped catalog into a
//! [`CatalogDocument`] with normalized prerequisite expressions and a reverse-dependency
//! index. The interactive half ([`graph`], [`layout`]) turns one course of that document into
//! a positioned node/edge set with AND/OR junction nodes, ready for a renderer.

pub mod format;
pub mod graph;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod store;

pub use format::{export_mermaid, MermaidExportError};
pub use graph::{course_graph, synthesize_graph, GraphError, SynthesisError};
pub use layout::{layout_graph, GraphLayout, LayoutConfig, LayoutError};
pub use model::{CatalogDocument, Course, PositionedGraph, Prereq, PrereqGraph};
pub use pipeline::{normalize, normalize_catalog, PipelineConfig, PipelineError};
pub use query::{find_course, search_courses, QueryError, SearchMode};
pub use store::{CatalogFile, StoreError, WriteDurability};

/// JSON Schema of the persisted `{courses, reversePrereqs}` document.
pub fn catalog_schema() -> schemars::Schema {
    schemars::schema_for!(CatalogDocument)
}
