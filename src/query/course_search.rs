// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use regex::RegexBuilder;

use crate::model::{CatalogDocument, Course};

/// Number of matches a search box shows at once.
pub const DEFAULT_SEARCH_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring match on `CODE: Title`, catalog order.
    #[default]
    Substring,
    /// Case-insensitive regular expression, catalog order.
    Regex,
    /// Subsequence match ranked by similarity, best first.
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidRegex { pattern: String, message: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, message } => {
                write!(f, "invalid search pattern {pattern:?}: {message}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Course lookup used when a graph node is clicked.
pub fn find_course<'a>(document: &'a CatalogDocument, code: &str) -> Option<&'a Course> {
    document.find_course(code)
}

/// Searches course labels (`CODE: Title`), returning at most `limit` courses.
///
/// A blank query matches every course in catalog order.
pub fn search_courses<'a>(
    document: &'a CatalogDocument,
    query: &str,
    mode: SearchMode,
    limit: usize,
) -> Result<Vec<&'a Course>, QueryError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(document.courses().iter().take(limit).collect());
    }

    let hits = match mode {
        SearchMode::Substring => document
            .courses()
            .iter()
            .filter(|course| course.display_label().to_lowercase().contains(&needle))
            .take(limit)
            .collect(),
        SearchMode::Regex => {
            let regex = RegexBuilder::new(query.trim())
                .case_insensitive(true)
                .build()
                .map_err(|err| QueryError::InvalidRegex {
                    pattern: query.to_owned(),
                    message: err.to_string(),
                })?;
            document
                .courses()
                .iter()
                .filter(|course| regex.is_match(&course.display_label()))
                .take(limit)
                .collect()
        }
        SearchMode::Fuzzy => {
            let mut scored = document
                .courses()
                .iter()
                .enumerate()
                .filter_map(|(idx, course)| {
                    let haystack = course.display_label().to_lowercase();
                    fuzzy_score(&needle, &haystack).map(|score| (score, idx, course))
                })
                .collect::<Vec<_>>();
            scored.sort_by(|(score_a, idx_a, _), (score_b, idx_b, _)| {
                score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
            });
            scored.into_iter().take(limit).map(|(_, _, course)| course).collect()
        }
    };

    Ok(hits)
}

struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, ':' | '-' | '_' | ' ' | ',')
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let stats = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= stats.span as i64;
    score -= (stats.first as i64) / 4;
    score += (stats.consecutive as i64) * 40;
    if stats.start_boundary {
        score += 150;
    }
    score += if haystack.contains(needle) { 2000 } else { 500 };

    Some(score)
}

/// Greedy left-to-right match of `needle`'s characters inside `haystack`.
fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut wanted = needle.chars().peekable();
    let mut first = None::<usize>;
    let mut last = 0usize;
    let mut prev_match = None::<usize>;
    let mut consecutive = 0usize;
    let mut start_boundary = false;
    let mut prev_char = None::<char>;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = wanted.peek() else {
            break;
        };
        if ch == want {
            wanted.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_char.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }
        prev_char = Some(ch);
    }

    if wanted.peek().is_some() {
        return None;
    }
    let first = first?;
    Some(SubsequenceStats { first, span: last - first + 1, consecutive, start_boundary })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::{fixture, rstest};

    use super::{find_course, search_courses, QueryError, SearchMode, DEFAULT_SEARCH_LIMIT};
    use crate::model::{fixtures, CatalogDocument, Course};

    #[fixture]
    fn document() -> CatalogDocument {
        fixtures::document()
    }

    fn codes<'a>(courses: &[&'a Course]) -> Vec<&'a str> {
        courses.iter().map(|course| course.code()).collect()
    }

    #[rstest]
    #[case("programming", &["CS101", "CS210"])]
    #[case("PROGRAMMING", &["CS101", "CS210"])]
    #[case("cs2", &["CS200", "CS210"])]
    #[case("cs200: data", &["CS200"])]
    #[case("  simulation ", &["CS310"])]
    #[case("nothing like this", &[])]
    fn substring_search_matches_labels_case_insensitively(
        document: CatalogDocument,
        #[case] query: &str,
        #[case] expected: &[&str],
    ) {
        let hits = search_courses(&document, query, SearchMode::Substring, DEFAULT_SEARCH_LIMIT)
            .expect("search");
        assert_eq!(codes(&hits), expected);
    }

    #[rstest]
    fn blank_queries_list_the_catalog_up_to_the_limit(document: CatalogDocument) {
        for mode in [SearchMode::Substring, SearchMode::Regex, SearchMode::Fuzzy] {
            let hits = search_courses(&document, "   ", mode, 3).expect("search");
            assert_eq!(codes(&hits), vec!["CS101", "CS102", "CS103"]);
        }
    }

    #[rstest]
    fn limit_truncates_in_catalog_order(document: CatalogDocument) {
        let hits = search_courses(&document, "cs", SearchMode::Substring, 2).expect("search");
        assert_eq!(codes(&hits), vec!["CS101", "CS102"]);
    }

    #[rstest]
    fn regex_search_is_case_insensitive(document: CatalogDocument) {
        let hits = search_courses(&document, r"^cs1\d\d:", SearchMode::Regex, DEFAULT_SEARCH_LIMIT)
            .expect("search");
        assert_eq!(codes(&hits), vec!["CS101", "CS102", "CS103"]);
    }

    #[rstest]
    fn invalid_regex_is_an_error(document: CatalogDocument) {
        let err = search_courses(&document, "(cs", SearchMode::Regex, DEFAULT_SEARCH_LIMIT)
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidRegex { ref pattern, .. } if pattern == "(cs"));
    }

    #[rstest]
    fn fuzzy_search_matches_subsequences(document: CatalogDocument) {
        let hits = search_courses(&document, "dtst", SearchMode::Fuzzy, DEFAULT_SEARCH_LIMIT)
            .expect("search");
        assert_eq!(codes(&hits), vec!["CS200"]);
    }

    #[rstest]
    fn fuzzy_search_ranks_contiguous_matches_first(document: CatalogDocument) {
        let hits = search_courses(&document, "cs10", SearchMode::Fuzzy, DEFAULT_SEARCH_LIMIT)
            .expect("search");
        let codes = codes(&hits);

        assert_eq!(codes.len(), 5);
        assert_eq!(
            codes[..3].iter().copied().collect::<BTreeSet<_>>(),
            BTreeSet::from(["CS101", "CS102", "CS103"])
        );
        assert_eq!(
            codes[3..].iter().copied().collect::<BTreeSet<_>>(),
            BTreeSet::from(["CS210", "CS310"])
        );
    }

    #[rstest]
    fn find_course_returns_the_first_match(document: CatalogDocument) {
        assert_eq!(find_course(&document, "CS300").map(Course::title), Some("Algorithms"));
        assert_eq!(find_course(&document, "cs300"), None);
    }
}
