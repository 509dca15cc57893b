// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive scene playback.
//!
//! Walks a [`SceneGraph`] read-only from the `start` scene, driven by
//! line input. All failure modes render as inline text; playback never
//! errors out.

use crate::model::{ActionTag, SceneGraph, SceneOption};

/// The scene id playback begins at.
pub const START_SCENE_ID: &str = "start";

const SCENE_NOT_FOUND: &str = "Error: Scene not found.";
const INVALID_OPTION: &str = "Invalid option. Type the number of your choice.";
const EMPTY_INPUT: &str = "Please enter a command or number.";
const DEAD_END: &str = "The path ends here.";
const CONTINUE_HINT: &str = "[Press Enter to continue]";

/// What the player hands back for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerReply {
    /// Text to print; playback continues.
    Message(String),
    /// Playback is over. A response attached to the final choice rides
    /// along so it still gets printed.
    Exit { message: Option<String> },
}

/// A playthrough of one graph. Owns its copy of the graph so the current
/// scene can never be edited out from under it.
#[derive(Debug, Clone)]
pub struct ScenePlayer {
    graph: SceneGraph,
    current: String,
}

impl ScenePlayer {
    pub fn new(graph: SceneGraph) -> Self {
        Self {
            graph,
            current: START_SCENE_ID.to_owned(),
        }
    }

    pub fn current_scene_id(&self) -> &str {
        &self.current
    }

    /// The current scene as the player sees it: prose, then numbered
    /// choices, or a continue hint when the scene has none.
    pub fn render_current(&self) -> String {
        let Some(scene) = self.graph.scene(&self.current) else {
            return SCENE_NOT_FOUND.to_owned();
        };

        let mut out = String::new();
        if !scene.text().is_empty() {
            out.push_str(scene.text());
            out.push('\n');
        }
        if scene.options().is_empty() {
            out.push_str(CONTINUE_HINT);
        } else {
            for (index, option) in scene.options().iter().enumerate() {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("[{}] {}", index + 1, option.text()));
            }
        }
        out
    }

    /// Resolves one line of input.
    ///
    /// `exit` always leaves. Empty input selects the sole choice when the
    /// scene has exactly one; otherwise choices are picked by 1-based
    /// number. Anything else is an error message and no transition.
    pub fn handle_input(&mut self, input: &str) -> PlayerReply {
        let input = input.trim();

        if input == "exit" {
            return PlayerReply::Exit { message: None };
        }

        let Some(scene) = self.graph.scene(&self.current) else {
            return PlayerReply::Message(SCENE_NOT_FOUND.to_owned());
        };
        let options = scene.options();

        if input.is_empty() {
            if options.len() == 1 {
                let choice = options[0].clone();
                return self.execute_choice(&choice);
            }
            if options.is_empty() {
                return PlayerReply::Message(EMPTY_INPUT.to_owned());
            }
        }

        let choice = input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| options.get(index).cloned());
        match choice {
            Some(choice) => self.execute_choice(&choice),
            None => PlayerReply::Message(INVALID_OPTION.to_owned()),
        }
    }

    fn execute_choice(&mut self, choice: &SceneOption) -> PlayerReply {
        if choice.action() == Some(&ActionTag::Exit) {
            return PlayerReply::Exit {
                message: choice.response().map(ToOwned::to_owned),
            };
        }

        let mut out = String::new();
        if let Some(response) = choice.response() {
            out.push_str(response);
        }

        if let Some(next) = choice.next() {
            self.current = next.as_str().to_owned();
        } else if choice.response().is_none() {
            return PlayerReply::Message(DEAD_END.to_owned());
        }
        // With a response but no target the scene re-renders in place.

        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&self.render_current());
        PlayerReply::Message(out)
    }
}
