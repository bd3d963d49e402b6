// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offline catalog normalization.
//!
//! Raw records flow through deduplication, prerequisite normalization and reverse indexing
//! to produce the persisted [`CatalogDocument`].

pub mod dedup;
pub mod normalize;
pub mod reverse_index;

use std::fmt;

use serde_json::{Map, Value};

pub use dedup::{dedup_courses, has_meaningful_prereqs, CourseKey, DedupOutcome};
pub use normalize::normalize_prereq;
pub use reverse_index::{build_reverse_index, ReverseIndexOptions};

use crate::model::{CatalogDocument, Course};

const KNOWN_FIELDS: [&str; 5] = ["id", "code", "title", "description", "prerequisites"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    deduplicate: bool,
    expand_compound_codes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { deduplicate: true, expand_compound_codes: false }
    }
}

impl PipelineConfig {
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_expand_compound_codes(mut self, expand: bool) -> Self {
        self.expand_compound_codes = expand;
        self
    }

    pub fn deduplicate(&self) -> bool {
        self.deduplicate
    }

    pub fn expand_compound_codes(&self) -> bool {
        self.expand_compound_codes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The input was neither an array of records nor an object with a `courses` array.
    UnexpectedShape { found: &'static str },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedShape { found } => write!(
                f,
                "expected an array of course records or an object with a `courses` array, \
                 found {found}"
            ),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Operator-facing counts; not part of the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineReport {
    pub input_records: usize,
    pub deduplicated_records: usize,
    pub removed_duplicates: usize,
    pub skipped_records: usize,
    pub courses_with_prereqs: usize,
    pub indexed_codes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCatalog {
    document: CatalogDocument,
    report: PipelineReport,
}

impl NormalizedCatalog {
    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }

    pub fn report(&self) -> &PipelineReport {
        &self.report
    }

    pub fn into_document(self) -> CatalogDocument {
        self.document
    }
}

/// Normalizes with the default configuration (deduplication on).
pub fn normalize(raw: &Value) -> Result<CatalogDocument, PipelineError> {
    normalize_catalog(raw, &PipelineConfig::default()).map(NormalizedCatalog::into_document)
}

/// Runs the full pipeline over a raw catalog.
///
/// Accepts a bare array of records or an object wrapping them under `courses`. Output order
/// is a pure function of input order.
pub fn normalize_catalog(
    raw: &Value,
    config: &PipelineConfig,
) -> Result<NormalizedCatalog, PipelineError> {
    let records = raw_records(raw)?.to_vec();
    let mut report = PipelineReport { input_records: records.len(), ..PipelineReport::default() };

    let records = if config.deduplicate {
        let outcome = dedup_courses(records);
        report.removed_duplicates = outcome.removed();
        outcome.into_records()
    } else {
        records
    };
    report.deduplicated_records = records.len();

    let mut courses = Vec::<Course>::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let Some(object) = record.as_object() else {
            tracing::warn!(index = idx, "skipping course record that is not a JSON object");
            report.skipped_records += 1;
            continue;
        };
        courses.push(normalize_course(object));
    }
    report.courses_with_prereqs =
        courses.iter().filter(|course| course.prerequisites().is_some()).count();

    let options = ReverseIndexOptions { expand_compound_codes: config.expand_compound_codes };
    let reverse_prereqs = build_reverse_index(&courses, options);
    report.indexed_codes = reverse_prereqs.len();

    tracing::info!(
        courses = courses.len(),
        with_prereqs = report.courses_with_prereqs,
        indexed_codes = report.indexed_codes,
        "normalized course catalog"
    );

    Ok(NormalizedCatalog { document: CatalogDocument::new(courses, reverse_prereqs), report })
}

fn raw_records(raw: &Value) -> Result<&[Value], PipelineError> {
    match raw {
        Value::Array(records) => Ok(records),
        Value::Object(object) => match object.get("courses") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(PipelineError::UnexpectedShape { found: json_kind(other) }),
            None => Err(PipelineError::UnexpectedShape { found: "an object without `courses`" }),
        },
        other => Err(PipelineError::UnexpectedShape { found: json_kind(other) }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds a canonical course from one raw record, keeping unknown fields.
pub fn normalize_course(record: &Map<String, Value>) -> Course {
    let prerequisites = record.get("prerequisites").and_then(normalize_prereq);
    let extra = record
        .iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<_, _>>();

    Course::new(text_field(record, "id"), text_field(record, "code"))
        .with_title(text_field(record, "title"))
        .with_description(text_field(record, "description"))
        .with_prerequisites(prerequisites)
        .with_extra(extra)
}

fn text_field(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
