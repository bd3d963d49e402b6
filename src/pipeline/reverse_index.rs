// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{split_compound, Course, ReversePrereqIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReverseIndexOptions {
    /// Also index each constituent of a comma-joined entry such as `"CS102, CS103"`.
    pub expand_compound_codes: bool,
}

/// Single forward pass over already-normalized courses.
///
/// For every code a course's expression mentions, the course's own code is appended to
/// that code's entry. Repeated mentions produce repeated entries.
pub fn build_reverse_index(courses: &[Course], options: ReverseIndexOptions) -> ReversePrereqIndex {
    let mut index = ReversePrereqIndex::default();

    for course in courses {
        let Some(prereq) = course.prerequisites() else {
            continue;
        };
        for entry in prereq.codes() {
            index.push(entry, course.code());
            if !options.expand_compound_codes {
                continue;
            }
            let parts = split_compound(entry);
            if parts.len() > 1 {
                for part in parts {
                    index.push(part, course.code());
                }
            }
        }
    }

    index
}
