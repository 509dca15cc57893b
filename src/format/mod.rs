// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scenescript parsing/export.
//!
//! The line-oriented scenescript text is both the editor's document format
//! and the runtime format the player walks; it must stay bit-compatible
//! across both.

pub mod scenescript;

pub use scenescript::{export_scene_script, parse_scene_script};
