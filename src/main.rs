// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undine CLI entrypoint.
//!
//! By default this runs the interactive TUI over a document store.
//! `--play` runs one scenescript file directly; `--check` parses a file
//! and reports what the graph looks like without opening a terminal UI.

use std::error::Error;
use std::fs;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<store-dir>]\n  {program} --play <file>\n  {program} --check <file>\n\nWith no arguments the document browser opens over the current working\ndirectory's store. --play runs a scenescript file as a playthrough.\n--check parses a scenescript file and reports scenes, options and\ndangling targets."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    store_dir: Option<String>,
    play_file: Option<String>,
    check_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--play" => {
                if options.play_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.play_file = Some(file);
            }
            "--check" => {
                if options.check_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.check_file = Some(file);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                options.store_dir = Some(arg);
            }
        }
    }

    if options.play_file.is_some() && (options.check_file.is_some() || options.store_dir.is_some())
    {
        return Err(());
    }
    if options.check_file.is_some() && options.store_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn check_file(path: &str) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let graph = undine::format::parse_scene_script(&text);

    let option_count: usize = graph.scenes().iter().map(|scene| scene.options().len()).sum();
    println!("{path}: {} scenes, {option_count} options", graph.len());

    let mut dangling = 0usize;
    for scene in graph.scenes() {
        for option in scene.options() {
            if let Some(next) = option.next() {
                if !graph.contains(next.as_str()) {
                    dangling += 1;
                    println!(
                        "  dangling target: {} -> {}",
                        scene.scene_id(),
                        next.as_str()
                    );
                }
            }
        }
    }
    if !graph.contains(undine::player::START_SCENE_ID) {
        println!("  no '{}' scene", undine::player::START_SCENE_ID);
    }
    if dangling == 0 {
        println!("  all targets resolve");
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "undine".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(file) = options.play_file {
            let text = fs::read_to_string(&file)?;
            undine::tui::play_text(&text)?;
            return Ok(());
        }

        if let Some(file) = options.check_file {
            return check_file(&file);
        }

        let dir = options.store_dir.unwrap_or_else(|| ".".to_owned());
        undine::tui::run(std::path::Path::new(&dir))?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("undine: {err}");
        std::process::exit(1);
    }
}
