//! # Avatar Component
//!
//! Terminals can't show the profile picture, so an avatar is a one-letter
//! badge plus the image's alt text. The alt text is what a screen reader
//! (or a browser with images off) would get on the web client.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Widget;

use crate::core::model::AVATAR_PLACEHOLDER;

/// Columns an avatar badge occupies (glyph plus one space each side).
pub const AVATAR_WIDTH: u16 = 3;

#[derive(Clone, Copy, Debug)]
pub struct Avatar<'a> {
    pub username: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

impl<'a> Avatar<'a> {
    pub fn new(username: Option<&'a str>, image_url: Option<&'a str>) -> Self {
        Self {
            username,
            image_url,
        }
    }

    /// `@{username}'s profile picture`. An absent username leaves the handle empty.
    pub fn alt_text(&self) -> String {
        format!("@{}'s profile picture", self.username.unwrap_or(""))
    }

    /// First letter of the username, uppercased, or the placeholder glyph.
    pub fn glyph(&self) -> char {
        self.username
            .and_then(|name| name.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(AVATAR_PLACEHOLDER)
    }

    fn style(&self) -> Style {
        // Users with a picture get a filled badge, the rest a dim one
        match self.image_url {
            Some(url) if !url.is_empty() => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::Gray).bg(Color::DarkGray),
        }
    }
}

impl Widget for Avatar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let badge = format!(" {} ", self.glyph());
        Span::styled(badge, self.style()).render(area, buf);
    }
}
