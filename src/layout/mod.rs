// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas geometry.
//!
//! Computes card extents, connection anchor points and the grid auto-layout
//! without touching any rendering surface.

pub mod canvas;

pub use canvas::{
    auto_layout, input_anchor, output_anchor, SceneMetrics, Size, TextMetrics, FOOTER_HEIGHT,
    HEADER_HEIGHT, OPTION_ROW_HEIGHT, SCENE_WIDTH,
};
