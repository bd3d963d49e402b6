// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::prereq::Prereq;

/// One canonical course record.
///
/// Identity is the `(id, code)` pair. Fields the pipeline does not interpret are carried
/// through untouched in `extra` and flattened back into the JSON object on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Course {
    #[serde(default)]
    id: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prerequisites: Option<Prereq>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Course {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: String::new(),
            description: String::new(),
            prerequisites: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Option<Prereq>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prerequisites(&self) -> Option<&Prereq> {
        self.prerequisites.as_ref()
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Search label in the `CODE: Title` form used by course pickers.
    pub fn display_label(&self) -> String {
        if self.title.is_empty() {
            return self.code.clone();
        }
        format!("{}: {}", self.code, self.title)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Course;
    use crate::model::Prereq;

    #[test]
    fn course_round_trips_unknown_fields() {
        let value = json!({
            "id": "42",
            "code": "CS200",
            "title": "Data Structures",
            "description": "Lists, trees and graphs.",
            "prerequisites": {"type": "simple", "courses": ["CS101"]},
            "units": 4,
            "department": "CS"
        });

        let course: Course = serde_json::from_value(value.clone()).expect("deserialize");
        assert_eq!(course.code(), "CS200");
        assert_eq!(course.prerequisites(), Some(&Prereq::simple("CS101")));
        assert_eq!(course.extra().get("units"), Some(&json!(4)));

        let back = serde_json::to_value(&course).expect("serialize");
        assert_eq!(back, value);
    }

    #[test]
    fn missing_prerequisites_serialize_as_null() {
        let course = Course::new("1", "CS101").with_title("Intro");
        let value = serde_json::to_value(&course).expect("serialize");
        assert_eq!(value["prerequisites"], json!(null));
        assert_eq!(course.display_label(), "CS101: Intro");
    }
}
