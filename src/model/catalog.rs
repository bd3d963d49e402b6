// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::course::Course;

/// Maps a course code to the codes of the courses that list it as a prerequisite.
///
/// Dependents keep catalog scan order. A dependent that mentions the same code twice
/// appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ReversePrereqIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl ReversePrereqIndex {
    pub fn push(&mut self, prerequisite: impl Into<String>, dependent: impl Into<String>) {
        self.entries.entry(prerequisite.into()).or_default().push(dependent.into());
    }

    /// Courses that directly require `code`; empty when nothing does.
    pub fn dependents(&self, code: &str) -> &[String] {
        self.entries.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(code, dependents)| (code.as_str(), dependents.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The persisted catalog artifact: `{courses, reversePrereqs}`.
///
/// Built once by the pipeline and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogDocument {
    courses: Vec<Course>,
    #[serde(rename = "reversePrereqs", default)]
    reverse_prereqs: ReversePrereqIndex,
}

impl CatalogDocument {
    pub fn new(courses: Vec<Course>, reverse_prereqs: ReversePrereqIndex) -> Self {
        Self { courses, reverse_prereqs }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn reverse_prereqs(&self) -> &ReversePrereqIndex {
        &self.reverse_prereqs
    }

    /// First course with the given code, in catalog order.
    pub fn find_course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.code() == code)
    }

    pub fn unlocked_by(&self, code: &str) -> &[String] {
        self.reverse_prereqs.dependents(code)
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
