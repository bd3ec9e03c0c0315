//! # TUI Components
//!
//! All UI components for the terminal page.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: page metadata and status line
//! - `IdentityBadge`: the sign-in trigger
//! - `Avatar`: one-letter badge with alt text
//! - `FeedItem`: a single post
//! - `LoadingSpinner`: feed placeholder while the query is in flight
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state across frames and handle events:
//! - `Composer`: draft text box (`ComposerState`)
//! - `FeedList`: scrollable feed with layout caching (`FeedListState`)
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props", never by reaching into
//! global state:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! FeedList::new(&mut tui.feed_list, app.feed_view(), now, spinner_frame).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! FeedList::render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (page metadata line)
//! ├── identity_badge.rs  (sign-in trigger)
//! ├── composer.rs        (avatar + draft input)
//! ├── avatar.rs          (profile badge)
//! ├── feed_item.rs       (single post)
//! ├── feed_list.rs       (loading / error / posts)
//! └── loading.rs         (spinner)
//! ```

pub mod avatar;
pub mod composer;
pub mod feed_item;
pub mod feed_list;
pub mod identity_badge;
pub mod loading;
mod title_bar;

pub use composer::{Composer, ComposerState};
pub use feed_list::{FeedList, FeedListState};
pub use identity_badge::IdentityBadge;
pub use title_bar::TitleBar;
