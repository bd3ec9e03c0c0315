//! # TitleBar Component
//!
//! Top line of the page: icon, title, description, and any status message.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"/favicon.ico Chirp · Chirp, Twitter inspired ... | Sign in at ..."`
//! 2. **Default**: `"/favicon.ico Chirp · Chirp, Twitter inspired site with emojis"`
//!
//! The status message goes last so the title survives narrow terminals.

use crate::core::model::PageMeta;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Stateless title line. Props only.
pub struct TitleBar<'a> {
    pub meta: &'a PageMeta,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(meta: &'a PageMeta, status_message: &'a str) -> Self {
        Self {
            meta,
            status_message,
        }
    }

    pub fn text(&self) -> String {
        let head = format!(
            "{} {} · {}",
            self.meta.icon, self.meta.title, self.meta.description
        );
        if self.status_message.is_empty() {
            head
        } else {
            format!("{head} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
