//! # IdentityBadge Component
//!
//! The sign-in trigger. Shown only when identity is known and nobody is
//! signed in; activating it hands off to the identity provider.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const SIGN_IN_LABEL: &str = "[ Sign in ]";

pub struct IdentityBadge {
    pub is_signed_in: bool,
}

impl IdentityBadge {
    pub fn new(is_signed_in: bool) -> Self {
        Self { is_signed_in }
    }
}

impl Component for IdentityBadge {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.is_signed_in {
            return;
        }

        let line = Line::from(vec![
            Span::styled(
                SIGN_IN_LABEL,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  press Enter", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
