// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::parse_scene_script;
use crate::layout::{auto_layout, SceneMetrics};
use crate::model::{GraphError, Position, SceneGraph, SceneId};

use super::viewport::{ScreenPoint, Viewport};

/// Mouse-wheel zoom step per wheel event.
const WHEEL_ZOOM_STEP: f64 = 0.03;

/// Toolbar zoom step.
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

/// Quick-created scenes land slightly above-left of the click, so the
/// cursor is not exactly on the card border.
const QUICK_CREATE_NUDGE: f64 = 10.0;

/// What the presentation layer resolved a pointer event to.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    SceneHeader(SceneId),
    InputAnchor(SceneId),
    OutputAnchor {
        scene_id: SceneId,
        option_index: usize,
    },
    Connection {
        scene_id: SceneId,
        option_index: usize,
    },
}

/// The top-level input state machine. Exactly one state is active at a
/// time; `PendingConnection` only exits through commit or cancel, never
/// through pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Idle,
    Panning {
        grab: ScreenPoint,
    },
    DraggingScene {
        scene_id: SceneId,
        last: ScreenPoint,
    },
    PendingConnection {
        source: SceneId,
        option_index: usize,
        endpoint: Position,
    },
}

/// The single authoritative editor state: graph, viewport, draw order and
/// the input state machine. Every mutation is applied synchronously to the
/// live graph; there is no undo log, and derived render state (connection
/// curves) is recomputed from here on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    graph: SceneGraph,
    viewport: Viewport,
    mode: EditorMode,
    draw_order: Vec<SceneId>,
    dirty: bool,
}

impl EditorSession {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            graph: SceneGraph::new(),
            viewport,
            mode: EditorMode::Idle,
            draw_order: Vec::new(),
            dirty: false,
        }
    }

    /// Replaces the whole session content with a freshly parsed document;
    /// viewport is re-centered and the session starts clean.
    pub fn load_text(&mut self, text: &str) {
        self.load_graph(parse_scene_script(text));
    }

    pub fn load_graph(&mut self, graph: SceneGraph) {
        self.draw_order = graph.scenes().iter().map(|s| s.scene_id().clone()).collect();
        self.graph = graph;
        self.mode = EditorMode::Idle;
        self.viewport.center();
        self.dirty = false;
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Bottom-to-top draw order; the last id renders above its siblings.
    pub fn draw_order(&self) -> &[SceneId] {
        &self.draw_order
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The pending connection's `(source, option_index, endpoint)` if the
    /// protocol is mid-flight.
    pub fn pending_connection(&self) -> Option<(&SceneId, usize, Position)> {
        match &self.mode {
            EditorMode::PendingConnection {
                source,
                option_index,
                endpoint,
            } => Some((source, *option_index, *endpoint)),
            _ => None,
        }
    }

    // --- pointer protocol ---

    pub fn pointer_down(&mut self, target: &PointerTarget, at: ScreenPoint) {
        match target {
            PointerTarget::Canvas => {
                if matches!(self.mode, EditorMode::Idle) {
                    let (pan_x, pan_y) = self.viewport.pan();
                    self.mode = EditorMode::Panning {
                        grab: ScreenPoint::new(at.x - pan_x, at.y - pan_y),
                    };
                }
            }
            PointerTarget::SceneHeader(scene_id) => {
                if matches!(self.mode, EditorMode::Idle) && self.graph.contains(scene_id.as_str())
                {
                    self.raise_scene(scene_id);
                    self.mode = EditorMode::DraggingScene {
                        scene_id: scene_id.clone(),
                        last: at,
                    };
                }
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, at: ScreenPoint) {
        match &mut self.mode {
            EditorMode::Panning { grab } => {
                let grab = *grab;
                self.viewport.set_pan(at.x - grab.x, at.y - grab.y);
            }
            EditorMode::DraggingScene { scene_id, last } => {
                let scale = self.viewport.scale();
                let dx = (at.x - last.x) / scale;
                let dy = (at.y - last.y) / scale;
                *last = at;
                let scene_id = scene_id.clone();
                if let Some(scene) = self.graph.scene_mut(scene_id.as_str()) {
                    let position = scene.position();
                    scene.set_position(Position::new(position.x + dx, position.y + dy));
                }
                self.mark_dirty();
            }
            EditorMode::PendingConnection { endpoint, .. } => {
                *endpoint = self.viewport.screen_to_world(at);
            }
            EditorMode::Idle => {}
        }
    }

    pub fn pointer_up(&mut self) {
        match self.mode {
            EditorMode::Panning { .. } | EditorMode::DraggingScene { .. } => {
                self.mode = EditorMode::Idle;
            }
            // A pending connection survives pointer-up; it resolves through
            // clicks only.
            EditorMode::Idle | EditorMode::PendingConnection { .. } => {}
        }
    }

    pub fn click(&mut self, target: &PointerTarget, at: ScreenPoint, modifier: bool) {
        // Connection deletion works the same in every state.
        if modifier {
            if let PointerTarget::Connection {
                scene_id,
                option_index,
            } = target
            {
                let _ = self.graph.set_option_next(scene_id.as_str(), *option_index, None);
                self.mark_dirty();
                return;
            }
        }

        // Clicking an output anchor starts (or re-targets) the protocol.
        if let PointerTarget::OutputAnchor {
            scene_id,
            option_index,
        } = target
        {
            let valid = self
                .graph
                .scene(scene_id.as_str())
                .is_some_and(|scene| *option_index < scene.options().len());
            if valid {
                self.mode = EditorMode::PendingConnection {
                    source: scene_id.clone(),
                    option_index: *option_index,
                    endpoint: self.viewport.screen_to_world(at),
                };
            }
            return;
        }

        let EditorMode::PendingConnection {
            source,
            option_index,
            ..
        } = &self.mode
        else {
            return;
        };
        let source = source.clone();
        let option_index = *option_index;

        match target {
            PointerTarget::InputAnchor(target_id) if self.graph.contains(target_id.as_str()) => {
                let _ =
                    self.graph
                        .set_option_next(source.as_str(), option_index, Some(target_id.clone()));
                self.mode = EditorMode::Idle;
                self.mark_dirty();
            }
            PointerTarget::Canvas if modifier => {
                let world = self.viewport.screen_to_world(at);
                let position =
                    Position::new(world.x - QUICK_CREATE_NUDGE, world.y - QUICK_CREATE_NUDGE);
                if let Ok(new_id) = self.create_scene(None, position) {
                    let _ = self.graph.set_option_next(source.as_str(), option_index, Some(new_id));
                }
                self.mode = EditorMode::Idle;
                self.mark_dirty();
            }
            _ => {
                // Any other click cancels without mutating anything.
                self.mode = EditorMode::Idle;
            }
        }
    }

    /// Wheel input: with the zoom modifier held, pointer-anchored zoom by a
    /// fixed step against the wheel direction; otherwise unscaled scroll
    /// panning.
    pub fn wheel(&mut self, at: ScreenPoint, delta_x: f64, delta_y: f64, zoom_modifier: bool) {
        if zoom_modifier {
            let step = if delta_y > 0.0 {
                -WHEEL_ZOOM_STEP
            } else {
                WHEEL_ZOOM_STEP
            };
            self.viewport.zoom_at(at, step);
        } else {
            self.viewport.scroll_by(delta_x, delta_y);
        }
    }

    // --- graph edits ---

    pub fn create_scene(
        &mut self,
        scene_id: Option<SceneId>,
        position: Position,
    ) -> Result<SceneId, GraphError> {
        let scene_id = self.graph.create_scene(scene_id, position)?.scene_id().clone();
        self.draw_order.push(scene_id.clone());
        self.mark_dirty();
        Ok(scene_id)
    }

    pub fn rename_scene(&mut self, old_id: &str, new_id: SceneId) -> Result<(), GraphError> {
        self.graph.rename_scene(old_id, new_id.clone())?;
        for entry in &mut self.draw_order {
            if entry.as_str() == old_id {
                *entry = new_id.clone();
            }
        }
        if let EditorMode::PendingConnection { source, .. } = &mut self.mode {
            if source.as_str() == old_id {
                *source = new_id;
            }
        }
        self.mark_dirty();
        Ok(())
    }

    pub fn delete_scene(&mut self, scene_id: &str) {
        if self.graph.remove_scene(scene_id).is_none() {
            return;
        }
        self.draw_order.retain(|entry| entry.as_str() != scene_id);
        if let EditorMode::PendingConnection { source, .. } = &self.mode {
            if source.as_str() == scene_id {
                self.mode = EditorMode::Idle;
            }
        }
        self.mark_dirty();
    }

    pub fn set_scene_text(&mut self, scene_id: &str, text: impl Into<String>) {
        if let Some(scene) = self.graph.scene_mut(scene_id) {
            scene.set_text(text);
            self.mark_dirty();
        }
    }

    pub fn add_option(&mut self, scene_id: &str, text: impl Into<String>) {
        if let Some(scene) = self.graph.scene_mut(scene_id) {
            scene.push_option(crate::model::SceneOption::new(text));
            self.mark_dirty();
        }
    }

    pub fn remove_option(&mut self, scene_id: &str, option_index: usize) {
        let removed = self
            .graph
            .scene_mut(scene_id)
            .and_then(|scene| scene.remove_option(option_index))
            .is_some();
        if !removed {
            return;
        }
        // Indices behind the pending source may have shifted; drop the
        // pending state rather than commit against the wrong option.
        if let EditorMode::PendingConnection { source, .. } = &self.mode {
            if source.as_str() == scene_id {
                self.mode = EditorMode::Idle;
            }
        }
        self.mark_dirty();
    }

    pub fn set_option_next(
        &mut self,
        scene_id: &str,
        option_index: usize,
        next: Option<SceneId>,
    ) -> Result<(), GraphError> {
        self.graph.set_option_next(scene_id, option_index, next)?;
        self.mark_dirty();
        Ok(())
    }

    // --- view controls ---

    pub fn auto_layout(&mut self, metrics: &impl SceneMetrics) {
        auto_layout(&mut self.graph, metrics);
        self.mark_dirty();
    }

    pub fn center_view(&mut self) {
        self.viewport.center();
    }

    pub fn zoom(&mut self, delta: f64) {
        self.viewport.zoom(delta);
    }

    fn raise_scene(&mut self, scene_id: &SceneId) {
        if let Some(index) = self.draw_order.iter().position(|entry| entry == scene_id) {
            let entry = self.draw_order.remove(index);
            self.draw_order.push(entry);
        }
    }
}
