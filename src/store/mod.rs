// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for catalogs on disk.
//!
//! Raw catalogs are read as loose JSON; the normalized document is written atomically and
//! loaded back by every consumer.

pub mod catalog_file;

pub use catalog_file::{read_raw_catalog, CatalogFile, StoreError, WriteDurability};
