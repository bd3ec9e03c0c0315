//! # View State Derivation
//!
//! Pure functions from the two external data sources (identity, feed query)
//! to what the page should show. The TUI matches on these; it never inspects
//! loading flags itself.
//!
//! ```text
//! Identity ──► PageView   Unresolved | SignedOut | SignedIn(user?)
//! Query    ──► FeedView   Loading | ErrorNoData | Loaded(items)
//! ```
//!
//! The two are independent: the feed may settle before or after identity.

use crate::api::query::QueryStatus;
use crate::core::model::{Identity, PostWithAuthor, UserProfile};

/// The one user-visible failure.
pub const FEED_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageView<'a> {
    /// Identity not known yet. Render an empty, mounted container.
    Unresolved,
    /// Known, nobody signed in. Show the sign-in trigger.
    SignedOut,
    /// Signed in. The profile may still be missing or partial.
    SignedIn(Option<&'a UserProfile>),
}

impl<'a> PageView<'a> {
    pub fn derive(identity: &'a Identity) -> Self {
        if !identity.is_loaded {
            PageView::Unresolved
        } else if identity.is_signed_in {
            PageView::SignedIn(identity.user.as_ref())
        } else {
            PageView::SignedOut
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedView<'a> {
    Loading,
    ErrorNoData,
    /// Items in server order. May be empty.
    Loaded(&'a [PostWithAuthor]),
}

impl<'a> FeedView<'a> {
    /// Loading wins over data; no data after loading is the error.
    pub fn derive(is_loading: bool, data: Option<&'a [PostWithAuthor]>) -> Self {
        match (is_loading, data) {
            (true, _) => FeedView::Loading,
            (false, None) => FeedView::ErrorNoData,
            (false, Some(items)) => FeedView::Loaded(items),
        }
    }

    pub fn from_status(status: &'a QueryStatus<Vec<PostWithAuthor>>) -> Self {
        Self::derive(status.is_loading(), status.data().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_post;

    #[test]
    fn test_page_view_unresolved_ignores_sign_in_flag() {
        let identity = Identity {
            is_loaded: false,
            is_signed_in: true,
            user: None,
        };
        assert_eq!(PageView::derive(&identity), PageView::Unresolved);
    }

    #[test]
    fn test_page_view_signed_out() {
        assert_eq!(PageView::derive(&Identity::signed_out()), PageView::SignedOut);
    }

    #[test]
    fn test_page_view_signed_in_passes_user() {
        let user = UserProfile {
            id: "u1".to_string(),
            username: Some("birdie".to_string()),
            profile_image_url: None,
        };
        let identity = Identity::signed_in(user.clone());
        assert_eq!(PageView::derive(&identity), PageView::SignedIn(Some(&user)));
    }

    #[test]
    fn test_feed_view_loading_wins() {
        let items = vec![sample_post("p1", "u1", 1)];
        assert_eq!(FeedView::derive(true, None), FeedView::Loading);
        assert_eq!(FeedView::derive(true, Some(&items)), FeedView::Loading);
    }

    #[test]
    fn test_feed_view_no_data_is_error() {
        assert_eq!(FeedView::derive(false, None), FeedView::ErrorNoData);
        let status = QueryStatus::Error("timeout".to_string());
        assert_eq!(FeedView::from_status(&status), FeedView::ErrorNoData);
    }

    #[test]
    fn test_feed_view_empty_is_loaded_not_error() {
        let status = QueryStatus::Success(Vec::new());
        assert_eq!(FeedView::from_status(&status), FeedView::Loaded(&[]));
    }

    #[test]
    fn test_feed_view_preserves_order() {
        let status = QueryStatus::Success(vec![
            sample_post("b", "u1", 120),
            sample_post("a", "u2", 10),
        ]);
        let FeedView::Loaded(items) = FeedView::from_status(&status) else {
            panic!("expected loaded feed");
        };
        let ids: Vec<&str> = items.iter().map(|p| p.post.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
