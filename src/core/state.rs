//! # Application State
//!
//! Core state for Chirp. Domain data only: no TUI types. Presentation state
//! (scroll offsets, composer buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── identity: Identity            // from the identity provider
//! ├── feed: QueryStatus<Vec<..>>    // mirror of the shared posts.getAll query
//! ├── meta: PageMeta                // title, description, icon
//! └── status_message: String        // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::query::QueryStatus;
use crate::core::model::{Identity, PageMeta, PostWithAuthor};
use crate::core::view::{FeedView, PageView};

pub struct App {
    pub identity: Identity,
    pub feed: QueryStatus<Vec<PostWithAuthor>>,
    pub meta: PageMeta,
    pub status_message: String,
}

impl App {
    pub fn new(meta: PageMeta) -> Self {
        Self {
            identity: Identity::unresolved(),
            feed: QueryStatus::Pending,
            meta,
            status_message: String::new(),
        }
    }

    pub fn page_view(&self) -> PageView<'_> {
        PageView::derive(&self.identity)
    }

    pub fn feed_view(&self) -> FeedView<'_> {
        FeedView::from_status(&self.feed)
    }
}
