// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connection routing.
//!
//! Derives drawable curve data from the graph; nothing here is stored
//! state, so every graph or viewport change simply re-routes.

pub mod connections;

pub use connections::{route_connections, route_pending, ConnectionCurve};
