// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

/// Whether `ident` can be used bare as a Mermaid node id.
pub(super) fn is_mermaid_ident(ident: &str) -> bool {
    !ident.is_empty()
        && !ident.eq_ignore_ascii_case("end")
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Derives Mermaid ids from node ids, keeping them readable and unique.
///
/// Characters Mermaid does not accept in ids become `_` (`or#0` -> `or_0`,
/// `MATH 20` -> `MATH_20`); collisions get a numeric suffix.
#[derive(Debug, Default)]
pub(super) struct IdentAllocator {
    taken: BTreeSet<String>,
}

impl IdentAllocator {
    pub(super) fn allocate(&mut self, raw: &str) -> String {
        let mut base = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect::<String>();
        if base.is_empty() {
            base.push('n');
        }
        if base.eq_ignore_ascii_case("end") {
            base.push('_');
        }

        let mut ident = base.clone();
        let mut suffix = 2usize;
        while self.taken.contains(&ident) {
            ident = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.taken.insert(ident.clone());
        ident
    }
}
