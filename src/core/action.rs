//! # Actions
//!
//! Everything that can happen in Chirp becomes an `Action`.
//! Identity provider answers? That's `Action::IdentityResolved(identity)`.
//! Feed query settles? That's `Action::FeedUpdated(status)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::query::QueryStatus;
use crate::core::model::{Identity, PostWithAuthor};
use crate::core::state::App;

#[derive(Debug, Clone)]
pub enum Action {
    IdentityResolved(Identity),
    FeedUpdated(QueryStatus<Vec<PostWithAuthor>>),
    /// The sign-in trigger was activated.
    SignInRequested,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Hand off to the identity provider's sign-in flow.
    OpenSignIn,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::IdentityResolved(identity) => {
            info!(
                "Identity resolved: signed_in={}, user={:?}",
                identity.is_signed_in,
                identity.user.as_ref().map(|u| u.id.as_str())
            );
            app.identity = identity;
            Effect::None
        }
        Action::FeedUpdated(status) => {
            match &status {
                QueryStatus::Pending => debug!("Feed pending"),
                QueryStatus::Error(e) => info!("Feed settled without data: {}", e),
                QueryStatus::Success(posts) => info!("Feed loaded: {} posts", posts.len()),
            }
            app.feed = status;
            Effect::None
        }
        Action::SignInRequested => {
            // Only meaningful while the trigger is on screen
            if app.identity.is_loaded && !app.identity.is_signed_in {
                Effect::OpenSignIn
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}
