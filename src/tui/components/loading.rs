//! Spinner placeholder shown while the feed query is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct LoadingSpinner {
    frame_index: usize,
}

impl LoadingSpinner {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    pub fn glyph(&self) -> char {
        SPINNER_FRAMES[self.frame_index % SPINNER_FRAMES.len()]
    }
}

impl Component for LoadingSpinner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let spinner = Paragraph::new(format!("{} Loading", self.glyph()))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(spinner, row);
    }
}
