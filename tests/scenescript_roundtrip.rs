// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use undine::editor::{EditorSession, PointerTarget, ScreenPoint, Viewport};
use undine::format::{export_scene_script, parse_scene_script};
use undine::model::SceneId;
use undine::player::{PlayerReply, ScenePlayer};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

#[test]
fn minimal_two_scene_script_parses_and_serializes_back() {
    let graph = parse_scene_script("# start\nHello\n* Go -> next\n\n# next\nBye\n");

    assert_eq!(graph.len(), 2);
    let start = graph.scene("start").expect("start scene");
    assert_eq!(start.text(), "Hello");
    assert_eq!(start.options().len(), 1);
    assert_eq!(start.options()[0].text(), "Go");
    assert_eq!(start.options()[0].next().unwrap().as_str(), "next");
    let next = graph.scene("next").expect("next scene");
    assert_eq!(next.text(), "Bye");
    assert!(next.options().is_empty());

    let reparsed = parse_scene_script(&export_scene_script(&graph));
    assert_eq!(reparsed, graph);
}

#[test]
fn hand_authored_fixture_round_trips_through_the_codec() {
    let text = read_fixture("mundane_quest.scene");
    let graph = parse_scene_script(&text);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.metadata().program_name(), Some("Mundane Quest"));
    assert!(graph.metadata().title_ascii().unwrap().contains("|_|  |_|"));

    let start = graph.scene("start").expect("start scene");
    assert_eq!(start.options().len(), 3);
    assert_eq!(
        start.options()[0].response(),
        Some("You swing your legs over the edge of the bed.")
    );

    let reparsed = parse_scene_script(&export_scene_script(&graph));
    assert_eq!(reparsed, graph);
}

#[test]
fn fixture_is_playable_start_to_coffee() {
    let graph = parse_scene_script(&read_fixture("mundane_quest.scene"));
    let mut player = ScenePlayer::new(graph);

    let opening = player.render_current();
    assert!(opening.contains("The ceiling is the same ceiling as yesterday."));
    assert!(opening.contains("[1] Get up"));

    match player.handle_input("1") {
        PlayerReply::Message(message) => {
            assert!(message.starts_with("You swing your legs over the edge of the bed."));
            assert!(message.contains("coffee machine"));
        }
        PlayerReply::Exit { .. } => panic!("playback ended early"),
    }
    assert_eq!(player.current_scene_id(), "kitchen");

    match player.handle_input("1") {
        PlayerReply::Message(message) => assert!(message.contains("Today might work out")),
        PlayerReply::Exit { .. } => panic!("playback ended early"),
    }
    assert_eq!(player.current_scene_id(), "victory");
}

#[test]
fn exit_tagged_option_ends_the_fixture_playthrough() {
    let graph = parse_scene_script(&read_fixture("mundane_quest.scene"));
    let mut player = ScenePlayer::new(graph);

    match player.handle_input("3") {
        PlayerReply::Exit { message } => {
            assert_eq!(message.as_deref(), Some("You pull the blanket over your head."));
        }
        PlayerReply::Message(message) => panic!("expected exit, got: {message}"),
    }
}

#[test]
fn editing_a_parsed_document_survives_export() {
    let mut session = EditorSession::new(Viewport::new(1024.0, 768.0));
    session.load_text(&read_fixture("mundane_quest.scene"));

    // Connect "Stare out the window" to the victory scene with the
    // two-click protocol, then rename the target.
    session.click(
        &PointerTarget::OutputAnchor {
            scene_id: SceneId::new("kitchen").unwrap(),
            option_index: 1,
        },
        ScreenPoint::new(0.0, 0.0),
        false,
    );
    session.click(
        &PointerTarget::InputAnchor(SceneId::new("victory").unwrap()),
        ScreenPoint::new(0.0, 0.0),
        false,
    );
    session
        .rename_scene("victory", SceneId::new("coffee").unwrap())
        .expect("rename");

    let text = export_scene_script(session.graph());
    let reparsed = parse_scene_script(&text);

    assert!(reparsed.contains("coffee"));
    assert!(!reparsed.contains("victory"));
    let kitchen = reparsed.scene("kitchen").expect("kitchen scene");
    assert_eq!(kitchen.options()[0].next().unwrap().as_str(), "coffee");
    assert_eq!(kitchen.options()[1].next().unwrap().as_str(), "coffee");
    assert_eq!(reparsed, *session.graph());
}

#[test]
fn deleting_a_scene_keeps_dangling_references_in_the_text_format() {
    let mut session = EditorSession::new(Viewport::new(800.0, 600.0));
    session.load_text(&read_fixture("mundane_quest.scene"));

    session.delete_scene("kitchen");

    let reparsed = parse_scene_script(&export_scene_script(session.graph()));
    let start = reparsed.scene("start").expect("start scene");
    assert_eq!(start.options()[0].next().unwrap().as_str(), "kitchen");
    assert!(!reparsed.contains("kitchen"));
}
