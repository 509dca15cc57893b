// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use undine::model::SceneGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongText,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeLongText => "large_long_text",
        }
    }
}

/// Builds a synthetic scenescript for the given case. Every option points
/// at a real scene so export and parse see fully linked graphs.
pub fn scene_script(case: Case) -> String {
    let (scenes, options_per_scene, text_lines) = match case {
        Case::Small => (10, 2, 1),
        Case::MediumDense => (100, 4, 2),
        Case::LargeLongText => (400, 3, 8),
    };

    let mut out = String::new();
    out.push_str("// @program_name bench_script\n\n");

    for scene in 0..scenes {
        let scene_id = if scene == 0 {
            "start".to_owned()
        } else {
            format!("scene_{scene}")
        };
        out.push_str(&format!("# {scene_id}\n"));
        out.push_str(&format!("// @pos {},{}\n", (scene % 8) * 450, (scene / 8) * 400));
        for line in 0..text_lines {
            out.push_str(&format!(
                "The corridor bends once more and the count reads {scene}-{line}, scrawled in chalk on damp stone.\n"
            ));
        }
        for option in 0..options_per_scene {
            let target = (scene + option + 1) % scenes;
            let target_id = if target == 0 {
                "start".to_owned()
            } else {
                format!("scene_{target}")
            };
            out.push_str(&format!("* Take passage {option} -> {target_id}\n"));
            if option == 0 {
                out.push_str("> The door groans open.\n");
            }
        }
        out.push('\n');
    }

    out
}

/// Cheap structural checksum so parse results cannot be optimized away.
pub fn checksum_graph(graph: &SceneGraph) -> u64 {
    let mut sum = 0u64;
    for scene in graph.scenes() {
        sum = sum
            .wrapping_add(scene.scene_id().as_str().len() as u64)
            .wrapping_add(scene.text().len() as u64)
            .wrapping_add(scene.position().x.abs() as u64);
        for option in scene.options() {
            sum = sum
                .wrapping_add(option.text().len() as u64)
                .wrapping_add(option.next().map_or(0, |next| next.as_str().len() as u64))
                .wrapping_add(option.response().map_or(0, |response| response.len() as u64));
        }
    }
    sum
}
