//! Identity provider capability.
//!
//! Chirp only consumes the read side ("who is signed in?") and the location
//! of the provider's sign-in flow. Sessions, tokens, and redirects belong to
//! the provider.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use crate::core::model::UserProfile;

#[derive(Debug)]
pub enum IdentityError {
    Network(String),
    Api { status: u16, message: String },
    Parse(String),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Network(msg) => write!(f, "network error: {msg}"),
            IdentityError::Api { status, message } => {
                write!(f, "identity provider error (HTTP {status}): {message}")
            }
            IdentityError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for IdentityError {}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError>;

    /// Where the user goes to sign in.
    fn sign_in_url(&self) -> String;
}

/// Identity provider reached over HTTP with a bearer session token.
pub struct HttpIdentityProvider {
    base_url: String,
    session_token: Option<String>,
    client: reqwest::Client,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, session_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError> {
        let Some(token) = self.session_token.as_deref() else {
            info!("No session token configured, treating user as signed out");
            return Ok(None);
        };

        let url = format!("{}/v1/me", self.base_url);
        debug!("Resolving identity from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                info!("Identity provider reports no active session ({})", response.status());
                Ok(None)
            }
            status if status.is_success() => {
                let user: UserProfile = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::Parse(e.to_string()))?;
                info!("Signed in as user {}", user.id);
                Ok(Some(user))
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                warn!("Identity provider error: {} - {}", status, message);
                Err(IdentityError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    fn sign_in_url(&self) -> String {
        format!("{}/sign-in", self.base_url)
    }
}
