//! # View Log
//!
//! What the user actually sees: an append-only list of role-labelled entries.
//! This is deliberately separate from the transcript, which the endpoint owns
//! and replaces wholesale on every reply.
//!
//! Content is escaped on the way in. Endpoint text goes straight to the
//! terminal, so escape sequences and control characters are stripped before
//! they can move the cursor, recolour the screen, or retitle the window.

use crate::conversation::Role;

/// One rendered block in the transcript view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub role: Role,
    pub content: String,
}

impl ViewEntry {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: escape_for_terminal(content),
        }
    }
}

const ESC: char = '\u{1b}';
const BEL: char = '\u{07}';
const TAB_WIDTH: usize = 4;

/// Strips terminal escape sequences and control characters from `text`.
///
/// - CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ESC \`) sequences are
///   removed whole; any other `ESC x` pair is dropped.
/// - `\r\n` and lone `\r` become `\n`; tabs become spaces.
/// - Remaining C0/C1 controls and DEL are dropped.
pub fn escape_for_terminal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESC => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameters and intermediates, then one final byte in 0x40..=0x7E
                    for next in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                }
                Some(&next) if ('\u{20}'..='\u{2f}').contains(&next) => {
                    // Intermediates, then one final byte in 0x30..=0x7E
                    while chars.next_if(|c| ('\u{20}'..='\u{2f}').contains(c)).is_some() {}
                    chars.next_if(|c| ('\u{30}'..='\u{7e}').contains(c));
                }
                Some(&next) if ('\u{30}'..='\u{7e}').contains(&next) => {
                    chars.next();
                }
                // A lone ESC: whatever follows is ordinary text
                _ => {}
            },
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\n' => out.push('\n'),
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}
