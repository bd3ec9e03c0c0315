//! # Domain Model
//!
//! Read-only view models handed to the UI. Nothing here is created or
//! mutated by Chirp itself: posts and authors come from the query layer,
//! the user profile comes from the identity provider.
//!
//! Optional fields stay `Option<T>` all the way to the render site, where
//! the fallbacks below are applied. Rendering never fails on a partial record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback glyph shown in an avatar badge when there is nothing to draw.
pub const AVATAR_PLACEHOLDER: char = '?';

/// The signed-in user as reported by the identity provider.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "image_url")]
    pub profile_image_url: Option<String>,
}

impl UserProfile {
    pub fn handle(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// Current authentication state.
///
/// `is_loaded` separates "don't know yet" from "known, signed out".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Identity {
    pub is_loaded: bool,
    pub is_signed_in: bool,
    pub user: Option<UserProfile>,
}

impl Identity {
    /// Initial state before the provider has answered.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn signed_out() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: false,
            user: None,
        }
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            is_loaded: true,
            is_signed_in: true,
            user: Some(user),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Author {
    pub fn handle(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// A post joined with its author. The join happens server-side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}

/// Static page metadata: window title, description line, and icon.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub icon: String,
}

pub const DEFAULT_TITLE: &str = "Chirp";
pub const DEFAULT_DESCRIPTION: &str = "Chirp, Twitter inspired site with emojis";
pub const DEFAULT_ICON: &str = "/favicon.ico";

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_with_author_parses_camel_case() {
        let json = r#"{
            "post": {"id": "p1", "content": "🐦🐦", "createdAt": "2024-03-01T12:00:00Z", "authorId": "u1"},
            "author": {"id": "u1", "username": "birdie", "profileImageUrl": "https://img/u1.png"}
        }"#;
        let parsed: PostWithAuthor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.post.id, "p1");
        assert_eq!(parsed.post.content, "🐦🐦");
        assert_eq!(parsed.author.handle(), "birdie");
        assert_eq!(
            parsed.author.profile_image_url.as_deref(),
            Some("https://img/u1.png")
        );
    }

    #[test]
    fn test_author_tolerates_null_username() {
        let json = r#"{"id": "u1", "username": null}"#;
        let author: Author = serde_json::from_str(json).unwrap();
        assert_eq!(author.handle(), "");
        assert!(author.profile_image_url.is_none());
    }

    #[test]
    fn test_identity_constructors() {
        assert!(!Identity::unresolved().is_loaded);

        let out = Identity::signed_out();
        assert!(out.is_loaded);
        assert!(!out.is_signed_in);
        assert!(out.user.is_none());

        let user = UserProfile {
            id: "u1".to_string(),
            ..Default::default()
        };
        let signed_in = Identity::signed_in(user);
        assert!(signed_in.is_signed_in);
        assert_eq!(signed_in.user.as_ref().map(|u| u.handle()), Some(""));
    }

    #[test]
    fn test_user_profile_accepts_image_url_alias() {
        let json = r#"{"id": "u1", "username": "a", "image_url": "https://img/a.png"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.profile_image_url.as_deref(), Some("https://img/a.png"));
    }
}
