// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Position;

pub const SCALE_MIN: f64 = 0.1;
pub const SCALE_MAX: f64 = 5.0;

/// Shift applied to world coordinates for the drawing surface, so curve
/// endpoints never need negative coordinates there.
pub const DRAWING_OFFSET: f64 = 50_000.0;

/// Raw pointer coordinates, relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom state and the conversions between screen, world and drawing
/// space. Pure presentation state: never persisted with a graph, reset on
/// load.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
    view_width: f64,
    view_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
            view_width: 0.0,
            view_height: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            view_width,
            view_height,
            ..Self::default()
        }
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    pub fn resize(&mut self, view_width: f64, view_height: f64) {
        self.view_width = view_width;
        self.view_height = view_height;
    }

    /// World = (screen - pan) / scale.
    pub fn screen_to_world(&self, point: ScreenPoint) -> Position {
        Position::new(
            (point.x - self.pan_x) / self.scale,
            (point.y - self.pan_y) / self.scale,
        )
    }

    /// Exact inverse of [`Self::screen_to_world`].
    pub fn world_to_screen(&self, point: Position) -> ScreenPoint {
        ScreenPoint::new(
            point.x * self.scale + self.pan_x,
            point.y * self.scale + self.pan_y,
        )
    }

    /// Drawing space = world space shifted by [`DRAWING_OFFSET`] per axis.
    pub fn world_to_drawing(point: Position) -> Position {
        Position::new(point.x + DRAWING_OFFSET, point.y + DRAWING_OFFSET)
    }

    /// Clamped scale increment; pan is left untouched (toolbar zoom).
    pub fn zoom(&mut self, delta: f64) {
        self.scale = (self.scale + delta).clamp(SCALE_MIN, SCALE_MAX);
    }

    /// Pointer-anchored zoom: the world point under `pointer` stays under
    /// the pointer across the scale change.
    pub fn zoom_at(&mut self, pointer: ScreenPoint, delta: f64) {
        let world = self.screen_to_world(pointer);
        self.scale = (self.scale + delta).clamp(SCALE_MIN, SCALE_MAX);
        self.pan_x = pointer.x - world.x * self.scale;
        self.pan_y = pointer.y - world.y * self.scale;
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    /// Adds a raw screen-space delta to the pan (drag panning).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Wheel-scroll panning: scroll deltas move the content, so the pan
    /// moves against them, unscaled.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.pan_x -= dx;
        self.pan_y -= dy;
    }

    /// Scale 1, world origin at the viewport center.
    pub fn center(&mut self) {
        self.scale = 1.0;
        self.pan_x = self.view_width / 2.0;
        self.pan_y = self.view_height / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::{ScreenPoint, Viewport, DRAWING_OFFSET, SCALE_MAX, SCALE_MIN};
    use crate::model::Position;

    #[test]
    fn screen_world_round_trip() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.pan_by(133.0, -48.0);
        viewport.zoom(0.7);

        for (x, y) in [(0.0, 0.0), (400.0, 300.0), (-25.5, 799.25)] {
            let screen = ScreenPoint::new(x, y);
            let back = viewport.world_to_screen(viewport.screen_to_world(screen));
            assert!((back.x - screen.x).abs() < 1e-9);
            assert!((back.y - screen.y).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.zoom(100.0);
        assert_eq!(viewport.scale(), SCALE_MAX);
        viewport.zoom(-100.0);
        assert_eq!(viewport.scale(), SCALE_MIN);
    }

    #[test]
    fn zoom_leaves_pan_untouched() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.pan_by(10.0, 20.0);
        viewport.zoom(0.5);
        assert_eq!(viewport.pan(), (10.0, 20.0));
    }

    #[test]
    fn pointer_anchored_zoom_keeps_world_point_under_pointer() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.pan_by(57.0, -19.0);
        viewport.zoom(0.4);

        let pointer = ScreenPoint::new(312.0, 209.0);
        let before = viewport.screen_to_world(pointer);
        viewport.zoom_at(pointer, 0.3);
        let after = viewport.screen_to_world(pointer);

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        // And again zooming out past several steps.
        viewport.zoom_at(pointer, -0.9);
        let after = viewport.screen_to_world(pointer);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn center_puts_world_origin_at_viewport_center() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.pan_by(-312.0, 88.0);
        viewport.zoom(1.5);
        viewport.center();

        assert_eq!(viewport.scale(), 1.0);
        let origin = viewport.world_to_screen(Position::new(0.0, 0.0));
        assert_eq!((origin.x, origin.y), (400.0, 300.0));
    }

    #[test]
    fn scroll_moves_pan_against_the_deltas() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_by(30.0, -12.0);
        assert_eq!(viewport.pan(), (-30.0, 12.0));
    }

    #[test]
    fn drawing_space_is_world_space_plus_offset() {
        let shifted = Viewport::world_to_drawing(Position::new(-10.0, 4.0));
        assert_eq!(shifted.x, DRAWING_OFFSET - 10.0);
        assert_eq!(shifted.y, DRAWING_OFFSET + 4.0);
    }
}
