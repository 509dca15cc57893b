// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::SceneId;
use super::scene::{Position, Scene};

/// Program-level metadata round-tripped through scenescript comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptMetadata {
    program_name: Option<String>,
    title_ascii: Option<String>,
}

impl ScriptMetadata {
    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    pub fn set_program_name<T: Into<String>>(&mut self, program_name: Option<T>) {
        self.program_name = program_name.map(Into::into).filter(|name| !name.is_empty());
    }

    pub fn title_ascii(&self) -> Option<&str> {
        self.title_ascii.as_deref()
    }

    pub fn set_title_ascii<T: Into<String>>(&mut self, title_ascii: Option<T>) {
        self.title_ascii = title_ascii.map(Into::into).filter(|title| !title.is_empty());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    DuplicateSceneId { scene_id: SceneId },
    UnknownScene { scene_id: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSceneId { scene_id } => {
                write!(f, "a scene with id '{scene_id}' already exists")
            }
            Self::UnknownScene { scene_id } => write!(f, "no scene with id '{scene_id}'"),
        }
    }
}

impl std::error::Error for GraphError {}

/// The canonical in-memory scene graph.
///
/// Scenes are kept in creation order; serialization and the fallback grid
/// layout depend on that order being stable. Ids are unique at all times.
/// All mutation is synchronous and immediately observable; there is no
/// transaction or undo log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneGraph {
    scenes: Vec<Scene>,
    metadata: ScriptMetadata,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> impl Iterator<Item = &mut Scene> {
        self.scenes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn metadata(&self) -> &ScriptMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ScriptMetadata {
        &mut self.metadata
    }

    pub fn contains(&self, scene_id: &str) -> bool {
        self.scenes.iter().any(|scene| scene.scene_id().as_str() == scene_id)
    }

    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.scene_id().as_str() == scene_id)
    }

    pub fn scene_mut(&mut self, scene_id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.scene_id().as_str() == scene_id)
    }

    /// Appends a scene, rejecting a duplicate id.
    pub fn insert(&mut self, scene: Scene) -> Result<(), GraphError> {
        if self.contains(scene.scene_id().as_str()) {
            return Err(GraphError::DuplicateSceneId {
                scene_id: scene.scene_id().clone(),
            });
        }
        self.scenes.push(scene);
        Ok(())
    }

    /// Creates an empty scene at `position`. When `scene_id` is `None` a
    /// unique `scene_<n>` id is generated with the lowest free `n`.
    pub fn create_scene(
        &mut self,
        scene_id: Option<SceneId>,
        position: Position,
    ) -> Result<&mut Scene, GraphError> {
        let scene_id = match scene_id {
            Some(scene_id) => {
                if self.contains(scene_id.as_str()) {
                    return Err(GraphError::DuplicateSceneId { scene_id });
                }
                scene_id
            }
            None => self.generate_scene_id(),
        };

        self.scenes.push(Scene::new(scene_id, position));
        Ok(self.scenes.last_mut().expect("scene just pushed"))
    }

    fn generate_scene_id(&self) -> SceneId {
        let mut n = 1usize;
        loop {
            let candidate = format!("scene_{n}");
            if !self.contains(&candidate) {
                return SceneId::new(candidate).expect("generated id is a valid line");
            }
            n += 1;
        }
    }

    /// Renames a scene, atomically rewriting every option across the graph
    /// whose `next` pointed at the old id.
    ///
    /// Fails without touching the graph when `new_id` is already taken.
    pub fn rename_scene(&mut self, old_id: &str, new_id: SceneId) -> Result<(), GraphError> {
        if old_id == new_id.as_str() {
            return Ok(());
        }
        if self.contains(new_id.as_str()) {
            return Err(GraphError::DuplicateSceneId { scene_id: new_id });
        }
        if !self.contains(old_id) {
            return Err(GraphError::UnknownScene {
                scene_id: old_id.to_owned(),
            });
        }

        for scene in &mut self.scenes {
            if scene.scene_id().as_str() == old_id {
                scene.set_scene_id(new_id.clone());
            }
            for option in scene.options_mut() {
                if option.next().is_some_and(|next| next.as_str() == old_id) {
                    option.set_next(Some(new_id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Removes a scene. Dangling `next` references elsewhere are left in
    /// place; that inconsistency is tolerated, not an error.
    pub fn remove_scene(&mut self, scene_id: &str) -> Option<Scene> {
        let index = self
            .scenes
            .iter()
            .position(|scene| scene.scene_id().as_str() == scene_id)?;
        Some(self.scenes.remove(index))
    }

    /// Sets `options[option_index].next` on the given scene. Used by the
    /// connection protocol; a `None` target clears the connection.
    pub fn set_option_next(
        &mut self,
        scene_id: &str,
        option_index: usize,
        next: Option<SceneId>,
    ) -> Result<(), GraphError> {
        let scene = self.scene_mut(scene_id).ok_or_else(|| GraphError::UnknownScene {
            scene_id: scene_id.to_owned(),
        })?;
        if let Some(option) = scene.option_mut(option_index) {
            option.set_next(next);
        }
        Ok(())
    }
}
