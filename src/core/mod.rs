//! # Core Application Logic
//!
//! This module contains Parley's business logic.
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
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌──────────────┐
//!          │    TUI     │                │ Conversation │
//!          │  Adapter   │                │    Client    │
//!          │ (ratatui)  │                │  (reqwest)   │
//!          └────────────┘                └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`view`]: The append-only, escaped view log
//! - [`theme`]: Light/dark preference and its durable storage
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod state;
pub mod theme;
pub mod view;
