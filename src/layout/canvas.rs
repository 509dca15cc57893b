// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Position, Scene, SceneGraph};

/// Fixed card width of a rendered scene, in world units.
pub const SCENE_WIDTH: f64 = 300.0;

/// Card header strip (id display + delete control).
pub const HEADER_HEIGHT: f64 = 28.0;

/// Trailing "add option" strip.
pub const FOOTER_HEIGHT: f64 = 24.0;

/// Height of one option row including its response line.
pub const OPTION_ROW_HEIGHT: f64 = 52.0;

const TEXT_LINE_HEIGHT: f64 = 18.0;
const TEXT_PADDING: f64 = 12.0;
const TEXT_MIN_HEIGHT: f64 = 60.0;

/// Column step and wrap limit for the row-packing auto layout.
const LAYOUT_COL_WIDTH: f64 = 450.0;
const LAYOUT_LIMIT_X: f64 = 2000.0;
const LAYOUT_ROW_GAP: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Measurement seam for a scene's rendered extent.
///
/// Anchor coordinates are a pure function of the graph plus a metrics
/// implementation, so the connection router works without any live
/// rendering surface. A front-end with real text measurement can plug its
/// own implementation in; [`TextMetrics`] is the documented default formula.
pub trait SceneMetrics {
    /// Height of the prose block alone.
    fn text_height(&self, scene: &Scene) -> f64;

    /// Full card extent: header, prose, one row per option, footer.
    fn size(&self, scene: &Scene) -> Size {
        Size {
            width: SCENE_WIDTH,
            height: HEADER_HEIGHT
                + self.text_height(scene)
                + scene.options().len() as f64 * OPTION_ROW_HEIGHT
                + FOOTER_HEIGHT,
        }
    }
}

/// Line-count based measurement: `max(60, lines * 18 + 12)` world units.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMetrics;

impl SceneMetrics for TextMetrics {
    fn text_height(&self, scene: &Scene) -> f64 {
        let lines = scene.text().lines().count().max(1) as f64;
        (lines * TEXT_LINE_HEIGHT + TEXT_PADDING).max(TEXT_MIN_HEIGHT)
    }
}

/// The input anchor sits at the card's top-left corner.
pub fn input_anchor(scene: &Scene) -> Position {
    scene.position()
}

/// The output anchor for `options[option_index]` sits on the card's right
/// edge, centered on that option's row. Returns `None` for an out-of-range
/// index.
pub fn output_anchor(
    scene: &Scene,
    option_index: usize,
    metrics: &impl SceneMetrics,
) -> Option<Position> {
    if option_index >= scene.options().len() {
        return None;
    }
    let position = scene.position();
    let row_top = HEADER_HEIGHT
        + metrics.text_height(scene)
        + option_index as f64 * OPTION_ROW_HEIGHT;
    Some(Position::new(
        position.x + SCENE_WIDTH,
        position.y + row_top + OPTION_ROW_HEIGHT / 2.0,
    ))
}

/// Packs scenes into rows in creation order: fixed 450-unit columns, wrap
/// past x=2000, each row as tall as its tallest card plus a 100-unit gap.
pub fn auto_layout(graph: &mut SceneGraph, metrics: &impl SceneMetrics) {
    let mut current_x = 0.0f64;
    let mut current_y = 0.0f64;
    let mut max_row_height = 0.0f64;

    for scene in graph.scenes_mut() {
        let height = metrics.size(scene).height;

        if current_x + LAYOUT_COL_WIDTH > LAYOUT_LIMIT_X && current_x > 0.0 {
            current_x = 0.0;
            current_y += max_row_height + LAYOUT_ROW_GAP;
            max_row_height = 0.0;
        }

        scene.set_position(Position::new(current_x, current_y));

        if height > max_row_height {
            max_row_height = height;
        }
        current_x += LAYOUT_COL_WIDTH;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        auto_layout, input_anchor, output_anchor, SceneMetrics, TextMetrics, FOOTER_HEIGHT,
        HEADER_HEIGHT, OPTION_ROW_HEIGHT, SCENE_WIDTH,
    };
    use crate::model::{Position, Scene, SceneGraph, SceneId, SceneOption};

    fn scene(id: &str, text: &str, option_count: usize) -> Scene {
        let mut scene = Scene::new(SceneId::new(id).expect("scene id"), Position::default());
        scene.set_text(text);
        for n in 0..option_count {
            scene.push_option(SceneOption::new(format!("option {n}")));
        }
        scene
    }

    #[test]
    fn text_height_grows_with_line_count() {
        let metrics = TextMetrics;
        let short = scene("a", "one line", 0);
        let tall = scene("b", "one\ntwo\nthree\nfour\nfive\nsix", 0);

        assert_eq!(metrics.text_height(&short), 60.0);
        assert!(metrics.text_height(&tall) > metrics.text_height(&short));
    }

    #[test]
    fn size_accounts_for_options() {
        let metrics = TextMetrics;
        let bare = scene("a", "text", 0);
        let with_options = scene("b", "text", 3);

        let delta = metrics.size(&with_options).height - metrics.size(&bare).height;
        assert_eq!(delta, 3.0 * OPTION_ROW_HEIGHT);
        assert_eq!(metrics.size(&bare).width, SCENE_WIDTH);
    }

    #[test]
    fn input_anchor_is_the_top_left_corner() {
        let mut s = scene("a", "text", 1);
        s.set_position(Position::new(40.0, -7.0));
        let anchor = input_anchor(&s);
        assert_eq!((anchor.x, anchor.y), (40.0, -7.0));
    }

    #[test]
    fn output_anchor_sits_on_the_right_edge_per_row() {
        let metrics = TextMetrics;
        let mut s = scene("a", "text", 2);
        s.set_position(Position::new(100.0, 200.0));

        let first = output_anchor(&s, 0, &metrics).expect("anchor");
        let second = output_anchor(&s, 1, &metrics).expect("anchor");

        assert_eq!(first.x, 100.0 + SCENE_WIDTH);
        assert_eq!(second.x, first.x);
        assert_eq!(second.y - first.y, OPTION_ROW_HEIGHT);

        let expected_first_y =
            200.0 + HEADER_HEIGHT + metrics.text_height(&s) + OPTION_ROW_HEIGHT / 2.0;
        assert_eq!(first.y, expected_first_y);

        assert!(output_anchor(&s, 2, &metrics).is_none());
    }

    #[test]
    fn auto_layout_packs_rows_and_wraps() {
        let mut graph = SceneGraph::new();
        for n in 0..6 {
            graph.insert(scene(&format!("s{n}"), "text", n % 3)).expect("insert");
        }
        let metrics = TextMetrics;
        auto_layout(&mut graph, &metrics);

        // First row: columns at 0, 450, ..., 1800 (1800 + 450 > 2000 wraps).
        let xs: Vec<f64> = graph.scenes().iter().map(|s| s.position().x).collect();
        assert_eq!(xs[..5], [0.0, 450.0, 900.0, 1350.0, 1800.0]);
        assert_eq!(xs[5], 0.0);

        let row_height = graph.scenes()[..5]
            .iter()
            .map(|s| metrics.size(s).height)
            .fold(0.0f64, f64::max);
        assert_eq!(graph.scenes()[5].position().y, row_height + 100.0);

        // Deterministic: a second pass yields identical positions.
        let before: Vec<(f64, f64)> =
            graph.scenes().iter().map(|s| (s.position().x, s.position().y)).collect();
        auto_layout(&mut graph, &metrics);
        let after: Vec<(f64, f64)> =
            graph.scenes().iter().map(|s| (s.position().x, s.position().y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn default_size_includes_header_and_footer() {
        let metrics = TextMetrics;
        let s = scene("a", "text", 0);
        assert_eq!(
            metrics.size(&s).height,
            HEADER_HEIGHT + metrics.text_height(&s) + FOOTER_HEIGHT
        );
    }
}
