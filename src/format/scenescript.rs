// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ActionTag, Position, Scene, SceneGraph, SceneId, SceneOption};

const PROGRAM_NAME_MARKER: &str = "// @program_name";
const TITLE_ASCII_MARKER: &str = "// @title_ascii";
const POS_MARKER: &str = "// @pos";

/// Fallback grid used for scenes without an explicit `@pos` line, so
/// hand-authored files get a reproducible layout: advance one column per
/// scene in creation order, wrap past the horizontal limit.
const GRID_COL_WIDTH: f64 = 450.0;
const GRID_LIMIT_X: f64 = 2000.0;
const GRID_ROW_STEP: f64 = 400.0;

struct GridCursor {
    x: f64,
    y: f64,
}

impl GridCursor {
    fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    fn take(&mut self) -> Position {
        let position = Position::new(self.x, self.y);
        self.x += GRID_COL_WIDTH;
        if self.x > GRID_LIMIT_X {
            self.x = 0.0;
            self.y += GRID_ROW_STEP;
        }
        position
    }
}

/// Parses scenescript text into a graph.
///
/// Parsing is total: malformed constructs degrade to literal text or are
/// ignored, and the worst case is an empty or partially-filled graph. Lines
/// are order-significant; a scene's text freezes once its first option
/// appears, and blank lines inside the text are preserved verbatim.
pub fn parse_scene_script(text: &str) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let mut current: Option<Scene> = None;
    let mut title_lines: Vec<String> = Vec::new();
    let mut cursor = GridCursor::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(PROGRAM_NAME_MARKER) {
            graph.metadata_mut().set_program_name(Some(rest.trim()));
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix(TITLE_ASCII_MARKER) {
            // The serializer emits exactly one space after the marker; strip
            // only that one so the title's own leading spaces survive.
            title_lines.push(rest.strip_prefix(' ').unwrap_or(rest).to_owned());
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('#') {
            finish_scene(&mut graph, current.take());
            let id = rest.trim();
            if let Ok(scene_id) = SceneId::new(id.to_owned()) {
                current = Some(Scene::new(scene_id, cursor.take()));
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(POS_MARKER) {
            if let (Some(scene), Some(position)) = (current.as_mut(), parse_pos(rest)) {
                scene.set_position(position);
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('*') {
            if let Some(scene) = current.as_mut() {
                scene.push_option(parse_option_payload(rest));
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('>') {
            if let Some(option) = current.as_mut().and_then(|s| s.options_mut().last_mut()) {
                append_response_line(option, rest.trim());
            }
            continue;
        }

        if trimmed.starts_with("//") {
            continue;
        }

        if let Some(scene) = current.as_mut() {
            if scene.options().is_empty() {
                let mut text = scene.text().to_owned();
                if !text.is_empty() {
                    text.push('\n');
                }
                // Keep the raw line for indentation fidelity.
                text.push_str(line);
                scene.set_text(text);
            }
        }
    }

    finish_scene(&mut graph, current.take());

    if !title_lines.is_empty() {
        graph.metadata_mut().set_title_ascii(Some(title_lines.join("\n")));
    }

    graph
}

fn finish_scene(graph: &mut SceneGraph, scene: Option<Scene>) {
    let Some(mut scene) = scene else {
        return;
    };
    scene.set_text(scene.text().trim().to_owned());
    // A repeated header replaces the earlier scene wholesale.
    graph.remove_scene(scene.scene_id().as_str());
    graph.insert(scene).expect("id just removed cannot collide");
}

fn parse_pos(rest: &str) -> Option<Position> {
    let (x, y) = rest.trim().split_once(',')?;
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    Some(Position::new(x, y))
}

/// Parses the payload after the `*` marker: an optional bracketed action tag
/// (taken from anywhere in the payload; an unmatched `[` stays literal),
/// then an optional `-> target` suffix. An empty right-hand side means no
/// target.
fn parse_option_payload(rest: &str) -> SceneOption {
    let mut payload = rest.trim().to_owned();

    let action = extract_action_tag(&mut payload);

    let (label, next) = match payload.split_once("->") {
        Some((label, target)) => {
            let target = target.trim();
            let next = if target.is_empty() {
                None
            } else {
                SceneId::new(target.to_owned()).ok()
            };
            (label.trim().to_owned(), next)
        }
        None => (payload.trim().to_owned(), None),
    };

    SceneOption::new_with(label, next, None, action)
}

fn extract_action_tag(payload: &mut String) -> Option<ActionTag> {
    let open = payload.find('[')?;
    let close = payload[open..].find(']').map(|offset| open + offset)?;
    let raw = payload[open + 1..close].to_owned();
    payload.replace_range(open..=close, "");
    Some(ActionTag::from_raw(raw))
}

fn append_response_line(option: &mut SceneOption, line: &str) {
    match option.response() {
        Some(existing) => {
            let mut joined = existing.to_owned();
            joined.push('\n');
            joined.push_str(line);
            option.set_response(Some(joined));
        }
        None => option.set_response(Some(line.to_owned())),
    }
}

/// Serializes a graph back to scenescript text.
///
/// This is the exact inverse of [`parse_scene_script`] up to integer-rounded
/// positions and trimmed text/response lines: metadata comments first, then
/// per scene the header, its `@pos` line, its text, and its options with
/// their response lines.
pub fn export_scene_script(graph: &SceneGraph) -> String {
    let mut out = String::new();

    if let Some(program_name) = graph.metadata().program_name() {
        out.push_str(PROGRAM_NAME_MARKER);
        out.push(' ');
        out.push_str(program_name);
        out.push('\n');
    }
    if let Some(title_ascii) = graph.metadata().title_ascii() {
        for line in title_ascii.lines() {
            out.push_str(TITLE_ASCII_MARKER);
            out.push(' ');
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    for scene in graph.scenes() {
        out.push_str("# ");
        out.push_str(scene.scene_id().as_str());
        out.push('\n');

        let position = scene.position();
        out.push_str(&format!(
            "{POS_MARKER} {},{}\n",
            position.x.round() as i64,
            position.y.round() as i64,
        ));

        out.push_str(scene.text().trim());
        out.push_str("\n\n");

        for option in scene.options() {
            out.push_str("* ");
            out.push_str(option.text());
            if let Some(action) = option.action() {
                out.push_str(" [");
                out.push_str(action.as_raw());
                out.push(']');
            }
            if let Some(next) = option.next() {
                out.push_str(" -> ");
                out.push_str(next.as_str());
            }
            out.push('\n');

            if let Some(response) = option.response() {
                for line in response.lines() {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }

    out
}
