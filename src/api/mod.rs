//! # Data Layer
//!
//! Everything that crosses the network: the post query source, the identity
//! provider, and the keyed query cache that deduplicates requests between
//! components.

pub mod identity;
pub mod posts;
pub mod query;

pub use identity::{HttpIdentityProvider, IdentityError, IdentityProvider};
pub use posts::{ApiError, HttpPostSource, PostSource, use_all_posts};
pub use query::{QueryCache, QueryKey, QueryStatus};
