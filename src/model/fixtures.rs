// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use super::catalog::CatalogDocument;
use crate::pipeline::normalize;

/// A small raw catalog exercising every prerequisite shape, one duplicate record and one
/// dangling prerequisite code (`PHYS 7A` is never defined).
pub(crate) fn raw_catalog() -> Value {
    json!({
        "courses": [
            {
                "id": "1",
                "code": "CS101",
                "title": "Intro to Programming",
                "description": "Variables, loops and functions.",
                "prerequisites": null
            },
            {
                "id": "2",
                "code": "CS102",
                "title": "Discrete Math",
                "description": "Sets, logic and proofs.",
                "prerequisites": {"type": "simple", "courses": [""]}
            },
            {
                "id": "3",
                "code": "CS103",
                "title": "Computer Organization",
                "description": "Bits and gates.",
                "prerequisites": {"type": "simple", "courses": ["CS101"]}
            },
            {
                "id": "4",
                "code": "CS200",
                "title": "Data Structures",
                "description": "Lists, trees and graphs.",
                "prerequisites": {"type": "or", "courses": ["CS101", "CS102, CS103"]}
            },
            {
                "id": "5",
                "code": "CS210",
                "title": "Systems Programming",
                "description": "Processes and memory.",
                "prerequisites": {"type": "and", "courses": ["CS103", "", "CS200"]}
            },
            {
                "id": "6",
                "code": "CS300",
                "title": "Algorithms",
                "description": "Design and analysis.",
                "prerequisites": {
                    "type": "complex",
                    "groups": [
                        {"type": "or", "courses": ["CS200", "CS210"]},
                        {"type": "or", "courses": ["CS102", "MATH 20"]},
                        {"type": "simple", "courses": ["CS200"]}
                    ]
                }
            },
            {
                "id": "7",
                "code": "CS310",
                "title": "Simulation",
                "description": "Numerical methods.",
                "prerequisites": {"type": "or", "courses": ["PHYS 7A"]}
            },
            {
                "id": "4",
                "code": "CS200",
                "title": "Data Structures (duplicate)",
                "description": "Second listing.",
                "prerequisites": null
            }
        ]
    })
}

pub(crate) fn document() -> CatalogDocument {
    normalize(&raw_catalog()).expect("fixture catalog normalizes")
}
