// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::editor::Viewport;
use crate::layout::{input_anchor, output_anchor, SceneMetrics};
use crate::model::{Position, SceneGraph, SceneId};

/// Minimum horizontal pull on the control points, so near-vertical or
/// overlapping cards still produce a legible curve.
const MIN_CONTROL_OFFSET: f64 = 50.0;

/// One routed cubic curve, in drawing-space coordinates.
///
/// Curves are derived from the graph on every call and never stored; a
/// connection IS `options[option_index].next`, nothing more. `target` is
/// `None` for the temporary curve tracking the pointer while a connection
/// is pending.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionCurve {
    pub source: SceneId,
    pub option_index: usize,
    pub target: Option<SceneId>,
    pub start: Position,
    pub control1: Position,
    pub control2: Position,
    pub end: Position,
}

fn cubic_controls(start: Position, end: Position) -> (Position, Position) {
    let dx = (end.x - start.x).abs();
    let offset = (dx * 0.5).max(MIN_CONTROL_OFFSET);
    (
        Position::new(start.x + offset, start.y),
        Position::new(end.x - offset, end.y),
    )
}

fn curve(
    source: SceneId,
    option_index: usize,
    target: Option<SceneId>,
    start_world: Position,
    end_world: Position,
) -> ConnectionCurve {
    let start = Viewport::world_to_drawing(start_world);
    let end = Viewport::world_to_drawing(end_world);
    let (control1, control2) = cubic_controls(start, end);
    ConnectionCurve {
        source,
        option_index,
        target,
        start,
        control1,
        control2,
        end,
    }
}

/// Routes every committed connection: one curve per option whose `next`
/// resolves to an existing scene. Dangling targets yield no curve.
pub fn route_connections(graph: &SceneGraph, metrics: &impl SceneMetrics) -> Vec<ConnectionCurve> {
    let mut curves = Vec::new();

    for scene in graph.scenes() {
        for (option_index, option) in scene.options().iter().enumerate() {
            let Some(target_id) = option.next() else {
                continue;
            };
            let Some(target) = graph.scene(target_id.as_str()) else {
                continue;
            };
            let Some(start) = output_anchor(scene, option_index, metrics) else {
                continue;
            };
            curves.push(curve(
                scene.scene_id().clone(),
                option_index,
                Some(target.scene_id().clone()),
                start,
                input_anchor(target),
            ));
        }
    }

    curves
}

/// Routes the temporary curve from a pending connection's source anchor to
/// the tracked pointer position (world space). Returns `None` when the
/// source no longer exists, e.g. after the scene or option was deleted.
pub fn route_pending(
    graph: &SceneGraph,
    source: &SceneId,
    option_index: usize,
    endpoint: Position,
    metrics: &impl SceneMetrics,
) -> Option<ConnectionCurve> {
    let scene = graph.scene(source.as_str())?;
    let start = output_anchor(scene, option_index, metrics)?;
    Some(curve(source.clone(), option_index, None, start, endpoint))
}
