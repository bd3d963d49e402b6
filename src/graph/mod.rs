// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive-side graph building for a selected course.

pub mod synthesize;

use std::fmt;

pub use synthesize::{synthesize_graph, JunctionIds, SynthesisError};

use crate::layout::{layout_graph, LayoutConfig, LayoutError};
use crate::model::{CatalogDocument, PositionedGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    UnknownCourse { code: String },
    Synthesis(SynthesisError),
    Layout(LayoutError),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCourse { code } => write!(f, "no course with code {code:?} in catalog"),
            Self::Synthesis(err) => write!(f, "graph synthesis failed: {err}"),
            Self::Layout(err) => write!(f, "layout failed: {err}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownCourse { .. } => None,
            Self::Synthesis(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<SynthesisError> for GraphError {
    fn from(value: SynthesisError) -> Self {
        Self::Synthesis(value)
    }
}

impl From<LayoutError> for GraphError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

/// Looks up `code`, synthesizes its neighborhood and lays it out.
///
/// This is the whole selection flow: a course code in, a positioned graph ready to render out.
pub fn course_graph(
    code: &str,
    document: &CatalogDocument,
    config: &LayoutConfig,
) -> Result<PositionedGraph, GraphError> {
    let course = document
        .find_course(code)
        .ok_or_else(|| GraphError::UnknownCourse { code: code.to_owned() })?;
    let graph = synthesize_graph(course, document)?;
    let layout = layout_graph(&graph, config)?;
    Ok(layout.apply(&graph))
}
