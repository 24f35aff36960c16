// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert plain-text chat transcripts to JSON.
//!
//! This crate provides parsing, filtering, and encoding functionality for
//! turning a line-oriented chat log into a sanitized JSON document.
//!
//! # Overview
//!
//! A transcript starts with the conversation name, followed by one message
//! per line as `<epoch seconds> <sender> <content>`. This crate:
//!
//! 1. Parses the transcript into typed messages
//! 2. Optionally keeps only one sender's messages and/or messages with a keyword
//! 3. Optionally redacts blacklisted words
//! 4. Optionally counts messages per sender
//! 5. Encodes the result as JSON
//!
//! # Example
//!
//! ```
//! use chatexport::{export, filter, parser};
//!
//! let transcript = "My Conversation\n1448470901 bob Hello there!\n1448470905 mike how are you?\n";
//! let conversation = parser::parse_transcript(transcript).unwrap();
//!
//! let opts = export::ExportOptions {
//!     filters: filter::FilterOptions {
//!         sender: Some("bob".into()),
//!         ..Default::default()
//!     },
//!     report_activity: true,
//! };
//!
//! let doc = export::export(conversation, &opts);
//! assert_eq!(doc.messages.len(), 1);
//!
//! let json = export::to_json(&doc, false).unwrap();
//! println!("{json}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: transcript parsing and the message types
//! - [`filter`]: sender and keyword filters, word redaction
//! - [`activity`]: per-sender message counts
//! - [`export`]: document assembly and JSON encoding

#![deny(missing_docs)]

pub mod activity;
pub mod export;
pub mod filter;
pub mod parser;
