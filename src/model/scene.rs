// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::SceneId;

/// A point in world space. World coordinates are unbounded reals; the
/// viewport maps them to the screen and the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The action tag an option may carry, e.g. `[exit]`.
///
/// The codec stores the raw tag text; the player branches on the typed
/// variants. Unknown tags are preserved verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTag {
    Exit,
    Custom(String),
}

impl ActionTag {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw == "exit" {
            Self::Exit
        } else {
            Self::Custom(raw)
        }
    }

    pub fn as_raw(&self) -> &str {
        match self {
            Self::Exit => "exit",
            Self::Custom(raw) => raw,
        }
    }
}

/// A choice within a scene.
///
/// `next` may dangle (reference a scene that does not exist); the model
/// tolerates this at all times and the router simply draws no curve for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOption {
    text: String,
    next: Option<SceneId>,
    response: Option<String>,
    action: Option<ActionTag>,
}

impl SceneOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: None,
            response: None,
            action: None,
        }
    }

    pub fn new_with(
        text: impl Into<String>,
        next: Option<SceneId>,
        response: Option<String>,
        action: Option<ActionTag>,
    ) -> Self {
        Self {
            text: text.into(),
            next,
            response,
            action,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn next(&self) -> Option<&SceneId> {
        self.next.as_ref()
    }

    pub fn set_next(&mut self, next: Option<SceneId>) {
        self.next = next;
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn set_response<T: Into<String>>(&mut self, response: Option<T>) {
        self.response = response.map(Into::into);
    }

    pub fn action(&self) -> Option<&ActionTag> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<ActionTag>) {
        self.action = action;
    }
}

/// A scene: a graph vertex with narrative text and an ordered list of options.
///
/// Option order is semantically meaningful; it is the numbered choice order
/// the player presents.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    scene_id: SceneId,
    position: Position,
    text: String,
    options: Vec<SceneOption>,
}

impl Scene {
    pub fn new(scene_id: SceneId, position: Position) -> Self {
        Self {
            scene_id,
            position,
            text: String::new(),
            options: Vec::new(),
        }
    }

    pub fn new_with(
        scene_id: SceneId,
        position: Position,
        text: impl Into<String>,
        options: Vec<SceneOption>,
    ) -> Self {
        Self {
            scene_id,
            position,
            text: text.into(),
            options,
        }
    }

    pub fn scene_id(&self) -> &SceneId {
        &self.scene_id
    }

    pub(crate) fn set_scene_id(&mut self, scene_id: SceneId) {
        self.scene_id = scene_id;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn options(&self) -> &[SceneOption] {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Vec<SceneOption> {
        &mut self.options
    }

    pub fn option(&self, index: usize) -> Option<&SceneOption> {
        self.options.get(index)
    }

    pub fn option_mut(&mut self, index: usize) -> Option<&mut SceneOption> {
        self.options.get_mut(index)
    }

    pub fn push_option(&mut self, option: SceneOption) {
        self.options.push(option);
    }

    /// Removes the option at `index`. Later options shift down one visual
    /// index; their semantic targets are untouched.
    pub fn remove_option(&mut self, index: usize) -> Option<SceneOption> {
        if index < self.options.len() {
            Some(self.options.remove(index))
        } else {
            None
        }
    }
}
