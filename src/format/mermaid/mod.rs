// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

mod ident;
pub mod prereq_graph;

pub use prereq_graph::{export_mermaid, MermaidExportError};
