// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Message filtering and word redaction.
//!
//! Each stage is a small function that can be used on its own:
//!
//! - [`sent_by`] builds a predicate keeping messages from one sender
//! - [`containing`] builds a predicate keeping messages with a keyword
//! - [`redact`] replaces blacklisted whole words in a piece of text
//!
//! [`apply_filters`] runs the enabled stages in order: sender filter,
//! keyword filter, then redaction of the survivors. Matching is always
//! case-sensitive and filtering never reorders messages.
//!
//! # Example
//!
//! ```
//! use chatexport::filter::{apply_filters, FilterOptions};
//! use chatexport::parser::parse_transcript;
//!
//! let conversation = parse_transcript(
//!     "Lunch\n1 bob do you like pie?\n2 mike no\n3 bob pie is great\n",
//! )
//! .unwrap();
//!
//! let opts = FilterOptions {
//!     sender: Some("bob".into()),
//!     blacklist: vec!["pie".into()],
//!     ..Default::default()
//! };
//!
//! let messages = apply_filters(conversation.messages, &opts);
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].content, "do you like *redacted*?");
//! ```

use crate::parser::Message;
use tracing::{debug, trace};

/// Replacement text for a redacted word.
pub const REDACTED: &str = "*redacted*";

/// Which filters to apply. The default applies none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Keep only messages whose sender id equals this value exactly.
    pub sender: Option<String>,

    /// Keep only messages whose content contains this substring.
    pub keyword: Option<String>,

    /// Words to replace with [`REDACTED`] wherever they appear as whole words.
    ///
    /// Empty entries are ignored.
    pub blacklist: Vec<String>,
}

impl FilterOptions {
    /// Returns `true` if no filter or redaction is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sender.is_none() && self.keyword.is_none() && self.blacklist.is_empty()
    }
}

/// Returns a predicate matching messages from `sender` (case-sensitive).
pub fn sent_by(sender: &str) -> impl Fn(&Message) -> bool + '_ {
    move |msg| msg.sender_id == sender
}

/// Returns a predicate matching messages whose content contains `keyword`
/// (case-sensitive substring).
pub fn containing(keyword: &str) -> impl Fn(&Message) -> bool + '_ {
    move |msg| msg.content.contains(keyword)
}

/// Runs the enabled filters over `messages` and redacts the survivors.
///
/// A message must pass every enabled filter to be kept. Redaction changes
/// content only, never the number or order of messages.
#[must_use]
pub fn apply_filters(messages: Vec<Message>, opts: &FilterOptions) -> Vec<Message> {
    if opts.is_empty() {
        return messages;
    }

    let total = messages.len();
    let mut kept: Vec<Message> = messages
        .into_iter()
        .filter(|msg| opts.sender.as_deref().is_none_or(|s| sent_by(s)(msg)))
        .filter(|msg| opts.keyword.as_deref().is_none_or(|k| containing(k)(msg)))
        .collect();

    if !opts.blacklist.is_empty() {
        for msg in &mut kept {
            msg.content = redact(&msg.content, &opts.blacklist);
        }
    }

    debug!(total, kept = kept.len(), "filtered messages");
    kept
}

/// Replaces every whole-word occurrence of each blacklisted word in `text`
/// with [`REDACTED`].
///
/// An occurrence counts as a whole word when the characters on either side
/// are not alphanumeric (or it touches the start or end of the text).
/// Matching is case-sensitive. Words are applied in the given order.
#[must_use]
pub fn redact<S: AsRef<str>>(text: &str, words: &[S]) -> String {
    let mut out = text.to_owned();
    for word in words.iter().map(AsRef::as_ref).filter(|w| !w.is_empty()) {
        out = redact_word(&out, word);
    }
    out
}

fn redact_word(text: &str, word: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // `copied` marks how much of `text` is already in `out`
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = text[pos..].find(word) {
        let start = pos + found;
        let end = start + word.len();

        if is_boundary(text[..start].chars().next_back())
            && is_boundary(text[end..].chars().next())
        {
            trace!(word, offset = start, "redacting");
            out.push_str(&text[copied..start]);
            out.push_str(REDACTED);
            copied = end;
            pos = end;
        } else {
            // Step one character so overlapping candidates are still tried.
            pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn is_boundary(c: Option<char>) -> bool {
    !c.is_some_and(char::is_alphanumeric)
}
