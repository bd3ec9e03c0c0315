//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Mount Sequence
//!
//! 1. Issue the `posts.getAll` query (prefetch) so its round-trip overlaps
//!    with identity resolution.
//! 2. Spawn identity resolution; it reports back over the action channel.
//! 3. Subscribe the feed list to the same query key. The cache hands back the
//!    prefetch's entry, so there is still only one request.
//! 4. Apply page metadata (terminal title). Fire-and-forget.
//!
//! Neither source is awaited. The loop renders whatever is known and redraws
//! when either one settles, in whichever order.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (feed loading): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, data, or resize.
//!   The idle redraw also keeps "N minutes ago" labels current.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use chrono::Utc;
use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use tokio::sync::watch;

use crate::api::{
    HttpIdentityProvider, HttpPostSource, IdentityProvider, PostSource, QueryCache, QueryStatus,
    use_all_posts,
};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::model::{Identity, PageMeta, PostWithAuthor};
use crate::core::state::App;
use crate::core::view::{FeedView, PageView};
use crate::tui::component::EventHandler;
use crate::tui::components::{ComposerState, FeedListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core state)
pub struct TuiState {
    pub composer: ComposerState,
    pub feed_list: FeedListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            composer: ComposerState::new(),
            feed_list: FeedListState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Show);
    }
}

/// Sets the terminal window title from the page metadata.
fn apply_page_meta(meta: &PageMeta) {
    if let Err(e) = execute!(stdout(), SetTitle(&meta.title)) {
        warn!("Failed to set terminal title: {}", e);
    }
}

/// Resolve the current user in the background and report it as an action.
///
/// Provider failures resolve to signed-out so the page never stays on the
/// placeholder.
fn spawn_identity_resolution(provider: Arc<dyn IdentityProvider>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let identity = match provider.current_user().await {
            Ok(Some(user)) => Identity::signed_in(user),
            Ok(None) => Identity::signed_out(),
            Err(e) => {
                warn!("Identity resolution failed, treating as signed out: {}", e);
                Identity::signed_out()
            }
        };
        if tx.send(Action::IdentityResolved(identity)).is_err() {
            warn!("Failed to send resolved identity: receiver dropped");
        }
    });
}

/// Start everything the page needs before its first frame.
///
/// The feed query is issued before identity resolution is even spawned, and
/// neither is awaited: the posts round-trip overlaps the identity lookup no
/// matter who turns out to be signed in. Returns the feed list's own
/// subscription, which shares the prefetch's cache entry.
fn mount(
    posts: &Arc<dyn PostSource>,
    identity: Arc<dyn IdentityProvider>,
    queries: &QueryCache<Vec<PostWithAuthor>>,
    tx: mpsc::Sender<Action>,
) -> watch::Receiver<QueryStatus<Vec<PostWithAuthor>>> {
    // Start fetching asap
    let _prefetch = use_all_posts(queries, posts);

    spawn_identity_resolution(identity, tx);

    let feed = use_all_posts(queries, posts);
    info!("Mounted; {} feed fetch(es) in flight", queries.fetch_count());
    feed
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let posts: Arc<dyn PostSource> = Arc::new(HttpPostSource::new(config.api_base_url.clone()));
    let identity: Arc<dyn IdentityProvider> = Arc::new(HttpIdentityProvider::new(
        config.identity_base_url.clone(),
        config.session_token.clone(),
    ));
    let queries: QueryCache<Vec<PostWithAuthor>> = QueryCache::new();

    let mut app = App::new(config.meta.clone());
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut feed = mount(&posts, Arc::clone(&identity), &queries, tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };
    apply_page_meta(&app.meta);

    let initial = feed.borrow_and_update().clone();
    update(&mut app, Action::FeedUpdated(initial));

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if feed.has_changed().unwrap_or(false) {
            let status = feed.borrow_and_update().clone();
            update(&mut app, Action::FeedUpdated(status));
            needs_redraw = true;
        }

        let animating = app.feed_view() == FeedView::Loading
            && app.page_view() != PageView::Unresolved;

        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, Utc::now()))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Idle ticks still redraw occasionally to age the timestamps
        if first_event.is_some() || !animating {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Scrolling always goes to the feed
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.feed_list.handle_event(&event);
                continue;
            }

            let mut sign_in_pressed = false;
            match app.page_view() {
                PageView::Unresolved => {}
                PageView::SignedOut => sign_in_pressed = matches!(event, TuiEvent::Submit),
                PageView::SignedIn(_) => {
                    tui.composer.handle_event(&event);
                }
            }

            if sign_in_pressed && update(&mut app, Action::SignInRequested) == Effect::OpenSignIn {
                let url = identity.sign_in_url();
                info!("Sign-in requested, handing off to {}", url);
                app.status_message = format!("Sign in at {url}");
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (identity resolution)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}
