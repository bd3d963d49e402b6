// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for synthesized prerequisite graphs.
//!
//! Computes layered node placement; edge routing is left to the renderer.

pub mod layered;

pub use layered::{
    layout_graph, EdgeEndpoint, GraphLayout, LayoutConfig, LayoutError, NodePlacement,
    MIN_SPACING,
};
