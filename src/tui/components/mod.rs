//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh every frame from the data they are handed:
//! - `TitleBar`: endpoint, status line and dark-mode switch
//! - `Message`: one role-labelled entry of the view log
//! - `TypingIndicator`: "assistant is typing" while an exchange is in flight
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own local state across frames and emit events:
//! - `InputBox`: text entry, emits `InputEvent::Submit`
//! - `MessageList`: scrollable view log, backed by `MessageListState`
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! TitleBar::new(endpoint, status, theme, unseen).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs         (top status bar)
//! ├── message.rs           (single entry renderer)
//! ├── message_list.rs      (scrollable entry container)
//! ├── typing_indicator.rs  (presence line above the input)
//! └── input_box/           (text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod typing_indicator;
pub use typing_indicator::TypingIndicator;
