// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A `SceneGraph` holds scenes (narrative text plus ordered options) and the
//! program metadata the scenescript codec round-trips.

pub mod graph;
pub mod ids;
pub mod scene;

pub use graph::{GraphError, SceneGraph, ScriptMetadata};
pub use ids::{DocumentName, Id, IdError, SceneId};
pub use scene::{ActionTag, Position, Scene, SceneOption};
