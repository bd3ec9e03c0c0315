//! # Composer Component
//!
//! Post drafting box shown to signed-in users: their avatar and a single-line
//! text input.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state (`ComposerState`, persisted in
//! `TuiState`). The user profile is a prop from the App's identity.
//!
//! Enter is swallowed. Drafts are never sent anywhere.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::model::UserProfile;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::avatar::{AVATAR_WIDTH, Avatar};
use crate::tui::event::TuiEvent;

pub const COMPOSER_PLACEHOLDER: &str = "Type some emojis!";

/// High-level events emitted by the composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    ContentChanged,
}

/// Draft text and cursor (byte offset into `buffer`, always on a char boundary).
#[derive(Debug, Default)]
pub struct ComposerState {
    pub buffer: String,
    cursor: usize,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor.
    fn cursor_column(&self) -> u16 {
        u16::try_from(self.buffer[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl EventHandler for ComposerState {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ComposerEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut utf8));
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line input: fold newlines into spaces
                let flattened = text.replace(&['\r', '\n'][..], " ");
                self.insert_str(&flattened);
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let start = self.prev_boundary();
                self.buffer.drain(start..self.cursor);
                self.cursor = start;
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            _ => None,
        }
    }
}

/// Transient composer view: created each frame with the current user.
pub struct Composer<'a> {
    pub user: Option<&'a UserProfile>,
    pub state: &'a ComposerState,
}

impl<'a> Composer<'a> {
    pub fn new(user: Option<&'a UserProfile>, state: &'a ComposerState) -> Self {
        Self { user, state }
    }
}

impl Component for Composer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(user) = self.user else {
            return;
        };

        let [avatar_area, _, input_area] = Layout::horizontal([
            Constraint::Length(AVATAR_WIDTH),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let avatar = Avatar::new(user.username.as_deref(), user.profile_image_url.as_deref());
        frame.render_widget(avatar, avatar_area);

        if self.state.buffer.is_empty() {
            frame.render_widget(
                Paragraph::new(COMPOSER_PLACEHOLDER).style(Style::default().fg(Color::DarkGray)),
                input_area,
            );
        } else {
            // Scroll horizontally so the cursor stays visible
            let column = self.state.cursor_column();
            let offset = column.saturating_sub(input_area.width.saturating_sub(1));
            frame.render_widget(
                Paragraph::new(self.state.buffer.as_str()).scroll((0, offset)),
                input_area,
            );
        }

        if input_area.width > 0 {
            let column = self
                .state
                .cursor_column()
                .min(input_area.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(input_area.x + column, input_area.y));
        }
    }
}
