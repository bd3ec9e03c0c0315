use std::borrow::Cow;

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::core::model::PostWithAuthor;
use crate::core::time::from_now;
use crate::tui::components::avatar::{AVATAR_WIDTH, Avatar};

/// Avatar column plus the gap before the text column.
const TEXT_INDENT: u16 = AVATAR_WIDTH + 1;
/// Header line plus the bottom separator.
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one post in the feed.
///
/// ```text
///  B  @birdie · 2 hours ago
///     content, wrapped to the text column
/// ─────────────────────────────────────
/// ```
///
/// Transient: built fresh each frame by `FeedList`. Content is shown
/// verbatim (no markdown, no emoji shortcodes).
#[derive(Clone, Copy)]
pub struct FeedItem<'a> {
    pub item: &'a PostWithAuthor,
    /// Reference time for the relative age label
    pub now: DateTime<Utc>,
}

impl<'a> FeedItem<'a> {
    pub fn new(item: &'a PostWithAuthor, now: DateTime<Utc>) -> Self {
        Self { item, now }
    }

    /// Rendering identity of an item across frames: the post id.
    pub fn key(item: &PostWithAuthor) -> &str {
        &item.post.id
    }

    pub fn handle(&self) -> String {
        format!("@{}", self.item.author.handle())
    }

    pub fn age(&self) -> String {
        from_now(self.item.post.created_at, self.now)
    }

    /// Height this item needs at `width`, without rendering it.
    ///
    /// Content is pre-wrapped with `textwrap` in `render` using the same
    /// options, so the prediction is exact.
    pub fn calculate_height(item: &PostWithAuthor, width: u16) -> u16 {
        let lines = wrap_content(&item.post.content, width.saturating_sub(TEXT_INDENT));
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn wrap_content(content: &str, text_width: u16) -> Vec<Cow<'_, str>> {
    if content.is_empty() {
        return Vec::new();
    }
    if text_width == 0 {
        // Degenerate terminal width: still reserve one row
        return vec![Cow::Borrowed("")];
    }
    let options = textwrap::Options::new(text_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(content, options)
}

impl Widget for FeedItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        block.render(area, buf);

        let [avatar_area, _, text_area] = Layout::horizontal([
            Constraint::Length(AVATAR_WIDTH),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let author = &self.item.author;
        Avatar::new(author.username.as_deref(), author.profile_image_url.as_deref())
            .render(Rect { height: 1.min(avatar_area.height), ..avatar_area }, buf);

        let mut lines = vec![Line::from(vec![
            Span::styled(self.handle(), Style::default().fg(Color::Gray)),
            Span::styled(
                format!(" · {}", self.age()),
                Style::default().fg(Color::DarkGray),
            ),
        ])];
        lines.extend(
            wrap_content(&self.item.post.content, text_area.width)
                .into_iter()
                .map(|l| Line::raw(l.into_owned())),
        );

        Paragraph::new(Text::from(lines)).render(text_area, buf);
    }
}
