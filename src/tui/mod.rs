// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! A document browser over the store plus a playback screen (ratatui +
//! crossterm). The app logic lives in [`App`] and is driven by key
//! events, so it is testable without a terminal.

use std::error::Error;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::player::{PlayerReply, ScenePlayer};
use crate::store::{DocumentEntry, DocumentStore};

const ACCENT_COLOR: Color = Color::LightCyan;
const NOTICE_COLOR: Color = Color::Yellow;
const PROMPT: &str = "> ";

/// Runs the document browser over the store rooted at `store_dir`.
pub fn run(store_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = DocumentStore::new(store_dir);
    let (documents, store_notice) = store.load_or_init();

    let mut app = App::browse(store, documents);
    if let Some(err) = store_notice {
        app.notice = Some(format!("Store could not be read: {err}"));
    }
    run_app(app)
}

/// Plays a single scenescript text without a store behind it.
pub fn play_text(text: &str) -> Result<(), Box<dyn Error>> {
    run_app(App::play(text))
}

fn run_app(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Browser,
    Player,
}

struct App {
    store: Option<DocumentStore>,
    documents: Vec<DocumentEntry>,
    selected: usize,
    screen: Screen,
    player: Option<ScenePlayer>,
    transcript: Vec<String>,
    input: String,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    fn browse(store: DocumentStore, documents: Vec<DocumentEntry>) -> Self {
        Self {
            store: Some(store),
            documents,
            selected: 0,
            screen: Screen::Browser,
            player: None,
            transcript: Vec::new(),
            input: String::new(),
            notice: None,
            should_quit: false,
        }
    }

    fn play(text: &str) -> Self {
        let mut app = Self {
            store: None,
            documents: Vec::new(),
            selected: 0,
            screen: Screen::Player,
            player: None,
            transcript: Vec::new(),
            input: String::new(),
            notice: None,
            should_quit: false,
        };
        app.start_playback_text(text);
        app
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Browser => self.handle_browser_key(key),
            Screen::Player => self.handle_player_key(key),
        }
    }

    fn handle_browser_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.documents.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.documents.get(self.selected) else {
            return;
        };
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.load_document(&entry.name) {
            Ok(text) => {
                self.notice = None;
                self.start_playback_text(&text);
            }
            Err(err) => self.notice = Some(format!("Cannot open document: {err}")),
        }
    }

    fn start_playback_text(&mut self, text: &str) {
        let player = ScenePlayer::new(crate::format::parse_scene_script(text));
        self.transcript = vec![player.render_current()];
        self.player = Some(player);
        self.input.clear();
        self.screen = Screen::Player;
    }

    fn handle_player_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.leave_playback(),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let input = std::mem::take(&mut self.input);
        self.transcript.push(format!("{PROMPT}{input}"));

        match player.handle_input(&input) {
            PlayerReply::Message(message) => self.transcript.push(message),
            PlayerReply::Exit { message } => {
                if let Some(message) = message {
                    self.transcript.push(message);
                }
                self.leave_playback();
            }
        }
    }

    /// Back to the browser; quits outright when playing a bare file.
    fn leave_playback(&mut self) {
        self.player = None;
        if self.store.is_some() {
            self.screen = Screen::Browser;
        } else {
            self.should_quit = true;
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    match app.screen {
        Screen::Browser => draw_browser(frame, app),
        Screen::Player => draw_player(frame, app),
    }
}

fn draw_browser(frame: &mut Frame<'_>, app: &mut App) {
    let [list_area, footer_area] =
        *Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.size())
    else {
        return;
    };

    let now = now_millis();
    let items: Vec<ListItem<'_>> = if app.documents.is_empty() {
        vec![ListItem::new("No documents yet.")]
    } else {
        app.documents
            .iter()
            .map(|entry| {
                ListItem::new(format!(
                    "{}  ({})",
                    entry.name.as_str(),
                    format_age(now, entry.modified_millis)
                ))
            })
            .collect()
    };

    let mut state = ListState::default();
    if !app.documents.is_empty() {
        state.select(Some(app.selected));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Undine "))
        .highlight_style(Style::default().fg(ACCENT_COLOR).bold())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut state);

    let footer = match &app.notice {
        Some(notice) => Line::styled(notice.clone(), Style::default().fg(NOTICE_COLOR)),
        None => Line::raw("enter: play   j/k: select   q: quit"),
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn draw_player(frame: &mut Frame<'_>, app: &mut App) {
    let [transcript_area, input_area] =
        *Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.size())
    else {
        return;
    };

    let text = app.transcript.join("\n\n");
    let inner_height = transcript_area.height.saturating_sub(2) as usize;
    let line_count = text.lines().count();
    let scroll = line_count.saturating_sub(inner_height) as u16;

    let transcript = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Play "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, transcript_area);

    let input = Paragraph::new(format!("{PROMPT}{}", app.input))
        .block(Block::default().borders(Borders::ALL).title(" Input "))
        .style(Style::default().fg(ACCENT_COLOR));
    frame.render_widget(input, input_area);
    frame.set_cursor(
        input_area.x + 1 + (PROMPT.len() + app.input.len()) as u16,
        input_area.y + 1,
    );
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn format_age(now_millis: u64, modified_millis: u64) -> String {
    let seconds = now_millis.saturating_sub(modified_millis) / 1000;
    if seconds < 60 {
        "just now".to_owned()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
