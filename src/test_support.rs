//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::api::{ApiError, PostSource};
use crate::core::model::{Author, PageMeta, Post, PostWithAuthor};
use crate::core::state::App;

/// Fixed "now" so relative timestamps are deterministic.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// A post by `@{author}` created `minutes_ago` before [`reference_now`].
pub fn sample_post(id: &str, author: &str, minutes_ago: i64) -> PostWithAuthor {
    PostWithAuthor {
        post: Post {
            id: id.to_string(),
            content: format!("post {id}"),
            created_at: reference_now() - Duration::minutes(minutes_ago),
        },
        author: Author {
            id: format!("{author}-id"),
            username: Some(author.to_string()),
            profile_image_url: Some(format!("https://img.example/{author}.png")),
        },
    }
}

/// A `PostSource` that returns canned posts and counts how often it is hit.
pub struct CountingPostSource {
    posts: Vec<PostWithAuthor>,
    calls: AtomicUsize,
}

impl CountingPostSource {
    pub fn new(posts: Vec<PostWithAuthor>) -> Self {
        Self {
            posts,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostSource for CountingPostSource {
    async fn all_posts(&self) -> Result<Vec<PostWithAuthor>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.posts.clone())
    }
}

/// Creates a test App with default page metadata.
pub fn test_app() -> App {
    App::new(PageMeta::default())
}

/// Flattens a test buffer into one string, row by row.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

/// Buffer rows as trimmed strings, for order assertions.
pub fn buffer_lines(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
        .collect()
}
