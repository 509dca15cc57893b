// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive editing state.
//!
//! [`Viewport`] holds pan/zoom and the coordinate conversions;
//! [`EditorSession`] owns the live graph plus the pointer state machine
//! (panning, card dragging and the two-click connection protocol).

pub mod session;
pub mod viewport;

pub use session::{EditorMode, EditorSession, PointerTarget, BUTTON_ZOOM_STEP};
pub use viewport::{ScreenPoint, Viewport, DRAWING_OFFSET, SCALE_MAX, SCALE_MIN};
