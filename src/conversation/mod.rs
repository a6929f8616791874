//! # Conversation Client
//!
//! The one network seam in Parley. Everything else is state and drawing.
//!
//! ```text
//!   user text + prior transcript
//!              │
//!              ▼
//!   ┌──────────────────────┐   POST {base}/conversation   ┌──────────┐
//!   │  ConversationClient  │ ───────────────────────────▶ │ endpoint │
//!   │  (trait)             │ ◀─────────────────────────── │          │
//!   └──────────────────────┘   { messages, response }     └──────────┘
//!              │
//!              ▼
//!   Outcome { reply, failure }
//! ```
//!
//! `exchange` reports errors; `send_message` swallows them into the
//! fallback reply, which is what the UI consumes.

pub mod client;
pub mod http;
pub mod types;

pub use client::{ConversationClient, FailureKind, Outcome, SendError};
pub use http::{HttpConversationClient, endpoint_url};
pub use types::{FALLBACK_RESPONSE, Message, Reply, Role};
