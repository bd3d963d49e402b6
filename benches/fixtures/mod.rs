// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use serde_json::{json, Value};

use course_atlas::{normalize, CatalogDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogParams {
    /// Distinct courses in the catalog.
    pub courses: usize,
    /// Every n-th record is emitted a second time with null prerequisites.
    pub duplicate_every: usize,
    /// How far back prerequisite references may reach.
    pub reach: usize,
}

impl CatalogParams {
    pub const fn new(courses: usize, duplicate_every: usize, reach: usize) -> Self {
        Self { courses, duplicate_every, reach }
    }
}

pub fn params(case: Case) -> CatalogParams {
    match case {
        Case::Small => CatalogParams::new(200, 17, 12),
        Case::Medium => CatalogParams::new(2_000, 13, 40),
        Case::Large => CatalogParams::new(12_000, 11, 120),
    }
}

pub fn code(idx: usize) -> String {
    format!("C{idx:05}")
}

/// Earlier course `step` positions back, wrapping within `reach`.
fn earlier(idx: usize, step: usize, reach: usize) -> String {
    let back = 1 + (idx.wrapping_mul(31).wrapping_add(step * 7)) % reach.max(1);
    code(idx.saturating_sub(back))
}

fn prerequisites(idx: usize, reach: usize) -> Value {
    if idx == 0 {
        return Value::Null;
    }
    let a = earlier(idx, 1, reach);
    let b = earlier(idx, 2, reach);
    let c = earlier(idx, 3, reach);
    match idx % 6 {
        0 => Value::Null,
        1 => json!({"type": "simple", "courses": [a]}),
        2 => json!({"type": "or", "courses": [a, format!("{b}, {c}")]}),
        3 => json!({"type": "and", "courses": [a, "", b]}),
        4 => json!({
            "type": "complex",
            "groups": [
                {"type": "or", "courses": [a, b]},
                {"type": "or", "courses": [c, "EXT 1"]},
                {"type": "simple", "courses": [a]}
            ]
        }),
        _ => json!({"type": "or", "courses": [a]}),
    }
}

pub fn raw_catalog(params: CatalogParams) -> Value {
    let duplicates = params.courses / params.duplicate_every.max(1);
    let mut records = Vec::with_capacity(params.courses + duplicates);
    for idx in 0..params.courses {
        let code = code(idx);
        if params.duplicate_every > 0 && idx % params.duplicate_every == 0 {
            records.push(json!({
                "id": idx.to_string(),
                "code": code,
                "title": format!("Course {idx} (listing)"),
                "prerequisites": null
            }));
        }
        records.push(json!({
            "id": idx.to_string(),
            "code": code,
            "title": format!("Course {idx}"),
            "description": format!("Generated course number {idx}."),
            "prerequisites": prerequisites(idx, params.reach)
        }));
    }
    json!({ "courses": records })
}

pub fn document(case: Case) -> CatalogDocument {
    normalize(&raw_catalog(params(case))).expect("fixture catalog normalizes")
}

/// The course with the most dependents: the widest graph a user can select.
pub fn busiest_code(document: &CatalogDocument) -> String {
    document
        .reverse_prereqs()
        .iter()
        .filter(|(code, _)| document.find_course(code).is_some())
        .max_by(|(code_a, deps_a), (code_b, deps_b)| {
            deps_a.len().cmp(&deps_b.len()).then_with(|| code_b.cmp(code_a))
        })
        .map(|(code, _)| code.to_owned())
        .expect("catalog has dependents")
}
