// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a loaded catalog: lookup by code and course search.

pub mod course_search;

pub use course_search::{
    find_course, search_courses, QueryError, SearchMode, DEFAULT_SEARCH_LIMIT,
};
