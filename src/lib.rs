// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undine — branching-narrative scene graph editor and player.
//!
//! The scene graph model, the scenescript text codec, canvas layout and
//! connection routing, the interactive editor state machine, a JSON
//! document store and a terminal front-end for browsing and playing
//! documents.

pub mod editor;
pub mod format;
pub mod layout;
pub mod model;
pub mod player;
pub mod render;
pub mod store;
pub mod tui;
