// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Assembling and encoding the exported document.
//!
//! This module turns a parsed [`Conversation`] into an [`ExportDocument`]
//! and serializes it as JSON.
//!
//! # Output Format
//!
//! ```json
//! {
//!   "name": "My Conversation",
//!   "messages": [
//!     {"timestamp": 1448470901, "senderId": "bob", "content": "Hello there!"}
//!   ],
//!   "activity": [
//!     {"senderId": "bob", "count": 1}
//!   ]
//! }
//! ```
//!
//! Timestamps are integer epoch seconds. `activity` is present only when
//! reporting was requested.
//!
//! # Example
//!
//! ```
//! use chatexport::export::{export, to_json, ExportOptions};
//! use chatexport::parser::parse_transcript;
//!
//! let conversation = parse_transcript("Chat\n1448470901 bob Hello there!\n").unwrap();
//! let opts = ExportOptions {
//!     report_activity: true,
//!     ..Default::default()
//! };
//!
//! let doc = export(conversation, &opts);
//! let json = to_json(&doc, false).unwrap();
//!
//! assert!(json.contains(r#""senderId":"bob""#));
//! assert!(json.contains(r#""timestamp":1448470901"#));
//! assert!(json.contains(r#""activity":[{"senderId":"bob","count":1}]"#));
//! ```

use crate::activity::{Report, activity_report};
use crate::filter::{FilterOptions, apply_filters};
use crate::parser::{Conversation, Message};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use tracing::debug;

/// Error type for document encoding failures.
#[derive(Debug, Snafu)]
pub enum EncodeError {
    /// Failed to serialize the document.
    #[snafu(display("failed to encode JSON: {source}"))]
    Json {
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}

/// Options controlling what goes into the exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Filters and redaction applied to the messages.
    pub filters: FilterOptions,

    /// Whether to include per-sender activity counts.
    pub report_activity: bool,
}

/// The final document handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// The conversation name.
    pub name: String,

    /// Messages after filtering and redaction, in transcript order.
    pub messages: Vec<Message>,

    /// Per-sender counts over `messages`, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<Report>>,
}

/// Combines a name, final messages, and an optional activity report.
#[must_use]
pub const fn assemble(
    name: String,
    messages: Vec<Message>,
    activity: Option<Vec<Report>>,
) -> ExportDocument {
    ExportDocument {
        name,
        messages,
        activity,
    }
}

/// Runs the filter stage and activity aggregation over a conversation and
/// assembles the result.
///
/// Activity is counted after filtering, so it reflects only the messages
/// that appear in the document.
#[must_use]
pub fn export(conversation: Conversation, opts: &ExportOptions) -> ExportDocument {
    let Conversation { name, messages } = conversation;
    let messages = apply_filters(messages, &opts.filters);

    let activity = opts.report_activity.then(|| activity_report(&messages));
    if let Some(reports) = &activity {
        debug!(senders = reports.len(), "computed activity report");
    }

    assemble(name, messages, activity)
}

/// Serializes a document as JSON, compact or pretty-printed.
///
/// # Errors
///
/// Returns [`EncodeError::Json`] if serialization fails.
pub fn to_json(doc: &ExportDocument, pretty: bool) -> Result<String, EncodeError> {
    if pretty {
        serde_json::to_string_pretty(doc).context(JsonSnafu)
    } else {
        serde_json::to_string(doc).context(JsonSnafu)
    }
}
