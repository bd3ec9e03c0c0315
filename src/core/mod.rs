//! # Core Application Logic
//!
//! This module contains Chirp's view logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • view derivation      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    API     │
//!             │  Adapter   │          │ (queries,  │
//!             │ (ratatui)  │          │  identity) │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`view`]: What to show, derived from identity and the feed query
//! - [`model`]: Posts, authors, and the user profile
//! - [`time`]: "3 hours ago" formatting

pub mod action;
pub mod config;
pub mod model;
pub mod state;
pub mod time;
pub mod view;
