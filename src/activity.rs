// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Per-sender message counts.

use crate::parser::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of messages attributed to one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The sender id.
    pub sender_id: String,

    /// How many messages this sender has in the counted sequence.
    pub count: u64,
}

/// Counts messages per sender.
///
/// Returns one [`Report`] per distinct sender, ordered by each sender's
/// first appearance in `messages`.
///
/// ```
/// use chatexport::activity::activity_report;
/// use chatexport::parser::parse_transcript;
///
/// let conversation = parse_transcript("c\n1 bob hi\n2 mike hey\n3 bob bye\n").unwrap();
/// let report = activity_report(&conversation.messages);
///
/// assert_eq!(report[0].sender_id, "bob");
/// assert_eq!(report[0].count, 2);
/// assert_eq!(report[1].sender_id, "mike");
/// ```
#[must_use]
pub fn activity_report(messages: &[Message]) -> Vec<Report> {
    let mut reports: Vec<Report> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for msg in messages {
        let slot = *index.entry(msg.sender_id.as_str()).or_insert_with(|| {
            reports.push(Report {
                sender_id: msg.sender_id.clone(),
                count: 0,
            });
            reports.len() - 1
        });
        reports[slot].count += 1;
    }

    reports
}
