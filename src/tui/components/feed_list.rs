//! # FeedList Component
//!
//! The feed: observes the shared `posts.getAll` query (via `FeedView`) and
//! branches on its state.
//!
//! ```text
//! Loading      → spinner, no items
//! ErrorNoData  → "Something went wrong"
//! Loaded(..)   → one FeedItem per post, server order, scrollable
//! ```
//!
//! ## Architecture
//!
//! `FeedList` is a transient component (created each frame) that wraps
//! `&'a mut FeedListState` (persistent state) and the derived `FeedView`
//! (props). It never starts, retries, or re-sorts the query.
//!
//! ## Windowed Scrolling
//!
//! The feed is unbounded, so its height does not fit the `u16` coordinates
//! of a terminal buffer. Offsets and item tops live in `u32`. Each frame only
//! the items intersecting the viewport are drawn into a `ScrollView` sized to
//! those items, and the scrollbar is drawn separately for the whole feed.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::model::PostWithAuthor;
use crate::core::view::{FEED_ERROR_MESSAGE, FeedView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::feed_item::FeedItem;
use crate::tui::components::loading::LoadingSpinner;
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the feed.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct FeedListState {
    /// Rows scrolled past the top of the feed
    offset: u32,
    pub layout: LayoutCache,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    window: ScrollViewState,
}

impl FeedListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Furthest the feed can scroll: the last row sits at the viewport bottom.
    pub fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    fn page(&self) -> u32 {
        u32::from(self.viewport_height.max(1))
    }
}

impl EventHandler for FeedListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        self.offset = match event {
            TuiEvent::ScrollUp => self.offset.saturating_sub(1),
            TuiEvent::ScrollDown => self.offset.saturating_add(1),
            TuiEvent::ScrollPageUp => self.offset.saturating_sub(self.page()),
            TuiEvent::ScrollPageDown => self.offset.saturating_add(self.page()),
            _ => return None,
        };
        self.clamp_scroll();
        None
    }
}

/// Item heights and tops, keyed by post id and width so a new feed or a
/// resize invalidates them.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running top of each item; `tops[i] + heights[i]` is its bottom
    tops: Vec<u32>,
    keys: Vec<String>,
    content_width: u16,
}

impl LayoutCache {
    pub fn total_height(&self) -> u32 {
        match (self.tops.last(), self.heights.last()) {
            (Some(top), Some(height)) => top.saturating_add(u32::from(*height)),
            _ => 0,
        }
    }

    fn is_valid_for(&self, items: &[PostWithAuthor], content_width: u16) -> bool {
        self.content_width == content_width
            && self.keys.len() == items.len()
            && self.keys.iter().zip(items).all(|(k, p)| k == FeedItem::key(p))
    }

    fn rebuild(&mut self, items: &[PostWithAuthor], content_width: u16) {
        self.heights = items
            .iter()
            .map(|p| FeedItem::calculate_height(p, content_width))
            .collect();
        self.tops = self
            .heights
            .iter()
            .scan(0u32, |top, h| {
                let this = *top;
                *top = top.saturating_add(u32::from(*h));
                Some(this)
            })
            .collect();
        self.keys = items.iter().map(|p| FeedItem::key(p).to_string()).collect();
        self.content_width = content_width;
    }

    fn top(&self, index: usize) -> u32 {
        self.tops.get(index).copied().unwrap_or_else(|| self.total_height())
    }

    /// Indices of items that intersect `[offset, offset + viewport)`.
    fn visible_range(&self, offset: u32, viewport: u16) -> std::ops::Range<usize> {
        let bottom_edge = offset.saturating_add(u32::from(viewport));
        let start = self
            .tops
            .iter()
            .zip(&self.heights)
            .position(|(top, h)| top.saturating_add(u32::from(*h)) > offset)
            .unwrap_or(self.heights.len());
        let end = start + self.tops[start..].partition_point(|top| *top < bottom_edge);
        start..end
    }
}

pub struct FeedList<'a> {
    pub state: &'a mut FeedListState,
    pub view: FeedView<'a>,
    pub now: DateTime<Utc>,
    pub spinner_frame: usize,
}

impl<'a> FeedList<'a> {
    pub fn new(
        state: &'a mut FeedListState,
        view: FeedView<'a>,
        now: DateTime<Utc>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            view,
            now,
            spinner_frame,
        }
    }

    fn render_items(&mut self, frame: &mut Frame, area: Rect, items: &[PostWithAuthor]) {
        use Constraint::{Length, Min};
        let [items_area, scrollbar_area] = Layout::horizontal([Min(0), Length(1)]).areas(area);
        let content_width = items_area.width;

        if !self.state.layout.is_valid_for(items, content_width) {
            self.state.layout.rebuild(items, content_width);
        }
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let layout = &self.state.layout;
        let offset = self.state.offset;
        let visible = layout.visible_range(offset, area.height);

        if !visible.is_empty() {
            let window_top = layout.top(visible.start);
            let window_height =
                u16::try_from(layout.top(visible.end) - window_top).unwrap_or(u16::MAX);

            let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

            let mut y: u16 = 0;
            for i in visible {
                if y >= window_height {
                    break;
                }
                let height = layout.heights[i].min(window_height - y);
                let rect = Rect::new(0, y, content_width, height);
                scroll_view.render_widget(FeedItem::new(&items[i], self.now), rect);
                y = y.saturating_add(layout.heights[i]);
            }

            // offset >= window_top: the first visible item starts at or above it
            let window_offset = u16::try_from(offset - window_top).unwrap_or(u16::MAX);
            self.state.window.set_offset(Position::new(0, window_offset));
            frame.render_stateful_widget(scroll_view, items_area, &mut self.state.window);
        }

        let max_offset = self.state.max_offset();
        if max_offset > 0 {
            // ScrollbarState content_length is max scrollable position, not total rows
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_offset as usize)
                .position(offset as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for FeedList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.view {
            FeedView::Loading => {
                LoadingSpinner::new(self.spinner_frame).render(frame, area);
            }
            FeedView::ErrorNoData => {
                frame.render_widget(
                    Paragraph::new(FEED_ERROR_MESSAGE).alignment(Alignment::Left),
                    area,
                );
            }
            FeedView::Loaded(items) => self.render_items(frame, area, items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_lines, buffer_text, reference_now, sample_post};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut FeedListState, view: FeedView<'_>, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|f| FeedList::new(state, view, reference_now(), 0).render(f, f.area()))
            .unwrap();
        terminal
    }

    #[test]
    fn test_loading_renders_spinner_and_no_items() {
        let mut state = FeedListState::new();
        let terminal = draw(&mut state, FeedView::derive(true, None), 10);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Loading"));
        assert!(!text.contains('@'));
        assert!(state.layout.heights.is_empty());
    }

    #[test]
    fn test_error_renders_fixed_message() {
        let mut state = FeedListState::new();
        let terminal = draw(&mut state, FeedView::derive(false, None), 5);
        let lines = buffer_lines(terminal.backend().buffer());
        let shown: Vec<&str> = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();
        assert_eq!(shown, vec![FEED_ERROR_MESSAGE]);
    }

    #[test]
    fn test_loaded_renders_items_in_order() {
        let mut p1 = sample_post("p1", "early", 120);
        p1.post.content = "first chirp".to_string();
        let mut p2 = sample_post("p2", "late", 10);
        p2.post.content = "second chirp".to_string();
        let items = vec![p1, p2];

        let mut state = FeedListState::new();
        let terminal = draw(&mut state, FeedView::derive(false, Some(&items)), 12);
        let lines = buffer_lines(terminal.backend().buffer());

        let row_of = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
        assert!(lines[row_of("@early")].contains("2 hours ago"));
        assert!(lines[row_of("@late")].contains("10 minutes ago"));
        assert!(row_of("@early") < row_of("first chirp"));
        assert!(row_of("first chirp") < row_of("@late"));
        assert!(row_of("@late") < row_of("second chirp"));
        assert_eq!(state.layout.heights.len(), 2);
    }

    #[test]
    fn test_empty_feed_is_not_an_error() {
        let items: Vec<PostWithAuthor> = Vec::new();
        let mut state = FeedListState::new();
        let terminal = draw(&mut state, FeedView::derive(false, Some(&items)), 5);
        let text = buffer_text(terminal.backend().buffer());
        assert!(!text.contains(FEED_ERROR_MESSAGE));
        assert!(!text.contains("Loading"));
        assert_eq!(state.layout.total_height(), 0);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let items: Vec<PostWithAuthor> = (0..20)
            .map(|i| sample_post(&format!("p{i}"), "birdie", i))
            .collect();
        let mut state = FeedListState::new();
        draw(&mut state, FeedView::derive(false, Some(&items)), 10);

        for _ in 0..100 {
            state.handle_event(&TuiEvent::ScrollPageDown);
        }
        let max_y = state.layout.total_height() - u32::from(state.viewport_height);
        assert_eq!(state.offset(), max_y);

        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.offset(), max_y - 1);
    }

    #[test]
    fn test_visible_range() {
        let mut cache = LayoutCache::default();
        cache.heights = vec![3, 3, 3, 3];
        cache.tops = vec![0, 3, 6, 9];
        assert_eq!(cache.visible_range(0, 4), 0..2);
        assert_eq!(cache.visible_range(3, 3), 1..2);
        assert_eq!(cache.visible_range(4, 10), 1..4);
    }

    #[test]
    fn test_layout_invalidated_by_new_items() {
        let first = vec![sample_post("a", "x", 1)];
        let second = vec![sample_post("b", "x", 1)];
        let mut cache = LayoutCache::default();
        cache.rebuild(&first, 40);
        assert!(cache.is_valid_for(&first, 40));
        assert!(!cache.is_valid_for(&second, 40));
        assert!(!cache.is_valid_for(&first, 41));
    }

    #[test]
    fn test_feed_taller_than_u16_draws_and_scrolls_to_the_end() {
        // 33k posts at 3 rows each: ~99k rows, past u16::MAX
        let items: Vec<PostWithAuthor> = (0..33_000)
            .map(|i| sample_post(&format!("p{i}"), "birdie", 5))
            .collect();
        let mut state = FeedListState::new();
        let terminal = draw(&mut state, FeedView::derive(false, Some(&items)), 10);
        assert_eq!(state.layout.total_height(), 99_000);
        assert!(buffer_text(terminal.backend().buffer()).contains("post p0"));

        for _ in 0..10_000 {
            state.handle_event(&TuiEvent::ScrollPageDown);
        }
        assert_eq!(state.offset(), 99_000 - 10);

        let terminal = draw(&mut state, FeedView::derive(false, Some(&items)), 10);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("post p32999"));
        assert!(!text.contains("post p0 "));
    }

    #[test]
    fn test_partially_scrolled_item_is_clipped_at_top() {
        let items = vec![sample_post("p1", "first", 5), sample_post("p2", "second", 5)];
        let mut state = FeedListState::new();
        draw(&mut state, FeedView::derive(false, Some(&items)), 4);

        // Scroll past p1's header row only
        state.handle_event(&TuiEvent::ScrollDown);
        let terminal = draw(&mut state, FeedView::derive(false, Some(&items)), 4);
        let lines = buffer_lines(terminal.backend().buffer());
        assert!(lines[0].contains("post p1"));
        assert!(!lines.iter().any(|l| l.contains("@first")));
        assert!(lines.iter().any(|l| l.contains("@second")));
    }
}
