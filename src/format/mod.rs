// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text export of synthesized graphs.
//!
//! Mermaid flowchart text lets any Mermaid renderer draw a course's prerequisite graph.

pub mod mermaid;

pub use mermaid::{export_mermaid, MermaidExportError};
