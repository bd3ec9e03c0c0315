//! Page composition: the root component of the terminal view.
//!
//! ```text
//! ┌ title bar ─────────────────────────────┐
//! │ │ [ Sign in ]  or   B  Type some emojis! │ │
//! │ │────────────────────────────────────────│ │
//! │ │ feed (loading / error / posts)          │ │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Until identity resolves the whole frame is an empty block: mounted, but
//! showing nothing. The feed query is already running at that point.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::state::App;
use crate::core::view::PageView;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Composer, FeedList, IdentityBadge, TitleBar};

/// Widest the page column gets on large terminals.
const MAX_PAGE_WIDTH: u16 = 80;
/// Header row plus its bottom border.
const HEADER_HEIGHT: u16 = 2;

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
    now: DateTime<Utc>,
) {
    let page = app.page_view();

    if page == PageView::Unresolved {
        frame.render_widget(Block::default(), frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    TitleBar::new(&app.meta, &app.status_message).render(frame, title_area);

    let [column] = Layout::horizontal([Constraint::Max(MAX_PAGE_WIDTH)])
        .flex(Flex::Center)
        .areas(body_area);
    let column_block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::Gray));
    let inner = column_block.inner(column);
    frame.render_widget(column_block, column);

    let [header_area, feed_area] = Layout::vertical([Length(HEADER_HEIGHT), Min(0)]).areas(inner);
    draw_header(frame, header_area, page, tui);

    FeedList::new(&mut tui.feed_list, app.feed_view(), now, spinner_frame).render(frame, feed_area);
}

fn draw_header(frame: &mut Frame, area: Rect, page: PageView<'_>, tui: &TuiState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Badge and composer are mutually exclusive
    match page {
        PageView::SignedOut => IdentityBadge::new(false).render(frame, inner),
        PageView::SignedIn(user) => Composer::new(user, &tui.composer).render(frame, inner),
        PageView::Unresolved => {}
    }
}
