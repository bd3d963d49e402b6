// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A normalized prerequisite expression.
///
/// Produced by [`crate::pipeline::normalize_prereq`]. Every `courses` list is non-empty,
/// every entry is a non-empty string, and `Simple` carries exactly one entry. A course
/// without a meaningful prerequisite has no `Prereq` at all (`None`).
///
/// An entry may still be a comma-joined compound such as `"CS102, CS103"`, which reads
/// as "all of these"; see [`split_compound`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Prereq {
    Simple { courses: Vec<String> },
    Or { courses: Vec<String> },
    And { courses: Vec<String> },
    /// Groups are ANDed together; each group is a single course or a disjunction.
    Complex { groups: Vec<PrereqGroup> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrereqGroup {
    Simple { courses: Vec<String> },
    Or { courses: Vec<String> },
}

impl Prereq {
    pub fn simple(code: impl Into<String>) -> Self {
        Self::Simple { courses: vec![code.into()] }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::Or { .. } => "or",
            Self::And { .. } => "and",
            Self::Complex { .. } => "complex",
        }
    }

    /// Every course entry mentioned by the expression, in expression order.
    ///
    /// Compound entries are returned as written; duplicates are kept.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::Simple { courses } | Self::Or { courses } | Self::And { courses } => {
                courses.iter().map(String::as_str).collect()
            }
            Self::Complex { groups } => groups.iter().flat_map(PrereqGroup::codes).collect(),
        }
    }
}

impl PrereqGroup {
    pub fn courses(&self) -> &[String] {
        match self {
            Self::Simple { courses } | Self::Or { courses } => courses,
        }
    }

    pub fn codes(&self) -> Vec<&str> {
        self.courses().iter().map(String::as_str).collect()
    }
}

/// Splits a comma-joined compound entry into its constituent course codes.
///
/// `"CS102, CS103"` yields `["CS102", "CS103"]`; a plain code yields itself. Blank
/// fragments are skipped, so the result is empty only for an all-blank entry.
pub fn split_compound(entry: &str) -> Vec<&str> {
    entry.split(',').map(str::trim).filter(|code| !code.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{split_compound, Prereq, PrereqGroup};

    #[test]
    fn serializes_with_type_tag() {
        let prereq = Prereq::Complex {
            groups: vec![
                PrereqGroup::Or { courses: vec!["A".to_owned(), "B".to_owned()] },
                PrereqGroup::Simple { courses: vec!["C".to_owned()] },
            ],
        };

        let value = serde_json::to_value(&prereq).expect("serialize");
        assert_eq!(
            value,
            json!({
                "type": "complex",
                "groups": [
                    {"type": "or", "courses": ["A", "B"]},
                    {"type": "simple", "courses": ["C"]}
                ]
            })
        );

        let back: Prereq = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, prereq);
    }

    #[test]
    fn codes_flatten_complex_groups_in_order() {
        let prereq = Prereq::Complex {
            groups: vec![
                PrereqGroup::Or { courses: vec!["A".to_owned(), "B".to_owned()] },
                PrereqGroup::Simple { courses: vec!["A".to_owned()] },
            ],
        };
        assert_eq!(prereq.codes(), vec!["A", "B", "A"]);
        assert_eq!(Prereq::simple("X").codes(), vec!["X"]);
    }

    #[rstest]
    #[case("CS101", vec!["CS101"])]
    #[case("CS102, CS103", vec!["CS102", "CS103"])]
    #[case("CS102,CS103 ,", vec!["CS102", "CS103"])]
    #[case(" , ", vec![])]
    fn splits_compound_entries(#[case] entry: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_compound(entry), expected);
    }
}
