// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Parsing for plain-text chat transcripts.
//!
//! A transcript is line oriented. The first line holds the conversation
//! name and every following non-blank line holds one message:
//!
//! ```text
//! My Conversation
//! 1448470901 bob Hello there!
//! 1448470905 mike how are you?
//! ```
//!
//! Each message line is split into an epoch-seconds timestamp, a sender id,
//! and the rest of the line as content.
//!
//! # Example
//!
//! ```
//! use chatexport::parser::parse_transcript;
//!
//! let conversation = parse_transcript("My Conversation\n1448470901 bob Hello there!\n").unwrap();
//! assert_eq!(conversation.name, "My Conversation");
//! assert_eq!(conversation.messages[0].content, "Hello there!");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use tracing::debug;

/// Error type for malformed transcripts.
///
/// Line numbers are 1-based and count the header line.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseError {
    /// The transcript has no header line.
    #[snafu(display("transcript is empty: expected a conversation name on the first line"))]
    EmptyTranscript,

    /// A message line has fewer than three whitespace-separated fields.
    #[snafu(display(
        "line {line}: expected `<timestamp> <sender> <content>`, found {found} field(s)"
    ))]
    MissingFields {
        /// Line number of the offending line.
        line: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// The timestamp field is not a non-negative integer.
    #[snafu(display("line {line}: invalid timestamp {value:?}: expected epoch seconds"))]
    InvalidTimestamp {
        /// Line number of the offending line.
        line: usize,
        /// The raw timestamp field.
        value: String,
    },

    /// The timestamp is numeric but cannot be represented as an instant.
    #[snafu(display("line {line}: timestamp {value} is out of range"))]
    TimestampOutOfRange {
        /// Line number of the offending line.
        line: usize,
        /// The raw timestamp field.
        value: String,
    },
}

/// A single utterance in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// When the message was sent, encoded as integer epoch seconds.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Identifier of the sender (never empty).
    pub sender_id: String,

    /// The message text. May contain internal whitespace.
    pub content: String,
}

/// A parsed transcript: the conversation name and its messages in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// The conversation title from the first transcript line.
    pub name: String,

    /// Messages in transcript order.
    pub messages: Vec<Message>,
}

/// Parses a complete transcript into a [`Conversation`].
///
/// Blank message lines are skipped. Parsing stops at the first malformed
/// line; no partial conversation is returned.
///
/// # Errors
///
/// Returns [`ParseError`] if the transcript is empty, or if any message line
/// has a bad timestamp or fewer than three fields.
pub fn parse_transcript(input: &str) -> Result<Conversation, ParseError> {
    let mut lines = input.lines();
    let name = lines.next().context(EmptyTranscriptSnafu)?.trim().to_owned();

    let mut messages = Vec::new();
    for (idx, raw) in lines.enumerate() {
        // +2: 1-based, and the header already consumed line 1
        let line = idx + 2;
        if raw.trim().is_empty() {
            continue;
        }
        messages.push(parse_line(raw, line)?);
    }

    debug!(name = %name, messages = messages.len(), "parsed transcript");
    Ok(Conversation { name, messages })
}

/// Parses one non-blank message line.
///
/// # Errors
///
/// Returns [`ParseError::MissingFields`] or a timestamp error.
pub fn parse_line(raw: &str, line: usize) -> Result<Message, ParseError> {
    let (timestamp, rest) = split_field(raw.trim());
    let (sender, content) = split_field(rest);

    let found = [timestamp, sender, content]
        .iter()
        .filter(|f| !f.is_empty())
        .count();
    ensure!(found == 3, MissingFieldsSnafu { line, found });

    Ok(Message {
        timestamp: parse_timestamp(timestamp, line)?,
        sender_id: sender.to_owned(),
        content: content.to_owned(),
    })
}

/// Splits off the first whitespace-delimited token, returning the token and
/// the remainder with its leading whitespace removed.
fn split_field(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (s, ""),
    }
}

fn parse_timestamp(value: &str, line: usize) -> Result<DateTime<Utc>, ParseError> {
    ensure!(
        !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
        InvalidTimestampSnafu { line, value }
    );

    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .context(TimestampOutOfRangeSnafu { line, value })
}
