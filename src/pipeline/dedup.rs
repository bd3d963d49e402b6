// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Identity of a raw course record: the `(id, code)` pair.
///
/// Both components use the JSON text of the raw field; a missing or `null` field reads
/// as `undefined` so records lacking an id still group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    id: String,
    code: String,
}

impl CourseKey {
    pub fn of(record: &Value) -> Self {
        Self { id: key_text(record.get("id")), code: key_text(record.get("code")) }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.code)
    }
}

fn key_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "undefined".to_owned(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    records: Vec<Value>,
    input: usize,
}

impl DedupOutcome {
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }

    pub fn input(&self) -> usize {
        self.input
    }

    pub fn output(&self) -> usize {
        self.records.len()
    }

    pub fn removed(&self) -> usize {
        self.input.saturating_sub(self.records.len())
    }
}

/// Whether the raw `prerequisites` field carries data worth preferring in a duplicate.
///
/// True for a tagged object whose tag is not `simple`, and for a non-empty array.
pub fn has_meaningful_prereqs(record: &Value) -> bool {
    match record.get("prerequisites") {
        Some(Value::Object(object)) => object
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|tag| !tag.is_empty() && tag != "simple"),
        Some(Value::Array(items)) => !items.is_empty(),
        _ => false,
    }
}

/// Collapses records sharing a [`CourseKey`].
///
/// The first record seen for a key is kept unless a later one has meaningful prerequisites
/// and the kept one does not; the replacement takes over the original slot, so output order
/// is first-seen key order.
pub fn dedup_courses(records: Vec<Value>) -> DedupOutcome {
    let input = records.len();
    let mut slots = HashMap::<CourseKey, usize>::with_capacity(input);
    let mut kept = Vec::<Value>::with_capacity(input);

    for record in records {
        let key = CourseKey::of(&record);
        match slots.get(&key).copied() {
            None => {
                slots.insert(key, kept.len());
                kept.push(record);
            }
            Some(slot) => {
                if has_meaningful_prereqs(&record) && !has_meaningful_prereqs(&kept[slot]) {
                    tracing::debug!(%key, "replacing duplicate course with a more complete record");
                    kept[slot] = record;
                }
            }
        }
    }

    let outcome = DedupOutcome { records: kept, input };
    tracing::info!(
        input = outcome.input(),
        output = outcome.output(),
        removed = outcome.removed(),
        "deduplicated course records"
    );
    outcome
}
