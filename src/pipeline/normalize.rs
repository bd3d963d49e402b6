// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use crate::model::{Prereq, PrereqGroup};

/// Canonicalizes one raw prerequisite expression.
///
/// Malformed input never errors: unknown tags, missing lists and lists that are empty after
/// dropping blank codes all normalize to `None`. Feeding a normalized expression back in
/// (as JSON) returns it unchanged.
pub fn normalize_prereq(raw: &Value) -> Option<Prereq> {
    let object = raw.as_object()?;
    let tag = object.get("type").and_then(Value::as_str)?;

    match tag {
        "simple" => {
            let first = object.get("courses").and_then(Value::as_array)?.first()?;
            course_code(first).map(Prereq::simple)
        }
        "or" | "and" => {
            let mut courses = course_codes(object);
            match courses.len() {
                0 => None,
                1 => courses.pop().map(Prereq::simple),
                _ if tag == "or" => Some(Prereq::Or { courses }),
                _ => Some(Prereq::And { courses }),
            }
        }
        "complex" => {
            let groups = object
                .get("groups")
                .and_then(Value::as_array)
                .map(|groups| groups.iter().filter_map(normalize_group).collect::<Vec<_>>())
                .unwrap_or_default();

            match groups.as_slice() {
                [] => None,
                [PrereqGroup::Simple { courses }] => Some(Prereq::Simple {
                    courses: courses.clone(),
                }),
                _ => Some(Prereq::Complex { groups }),
            }
        }
        _ => None,
    }
}

/// A group is a disjunction unless a single code survives; its raw tag is not consulted.
fn normalize_group(raw: &Value) -> Option<PrereqGroup> {
    let mut courses = course_codes(raw.as_object()?);
    match courses.len() {
        0 => None,
        1 => courses.pop().map(|code| PrereqGroup::Simple { courses: vec![code] }),
        _ => Some(PrereqGroup::Or { courses }),
    }
}

fn course_codes(object: &Map<String, Value>) -> Vec<String> {
    object
        .get("courses")
        .and_then(Value::as_array)
        .map(|codes| codes.iter().filter_map(course_code).collect())
        .unwrap_or_default()
}

/// Falsy entries (`null`, `false`, `0`, `""`) are dropped; non-zero numbers keep their JSON text.
fn course_code(raw: &Value) -> Option<String> {
    match raw {
        Value::String(code) if !code.is_empty() => Some(code.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        _ => None,
    }
}
