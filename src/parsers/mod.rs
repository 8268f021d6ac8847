//! Message extraction.
//!
//! [`TelegramHtmlExtractor`] produces an [`Extraction`]: the retained
//! messages, one [`ExtractIssue`] per dropped message or attachment, and
//! counters. Extraction itself never logs; issues are reported by
//! [`Diagnostics`](crate::diagnostics::Diagnostics).

pub mod telegram_html;

use serde::Serialize;

use crate::Message;

pub use telegram_html::TelegramHtmlExtractor;

/// Result of extracting one document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Retained messages in document order.
    pub messages: Vec<Message>,
    /// Everything that was dropped, in document order.
    pub issues: Vec<ExtractIssue>,
    /// Counters.
    pub stats: ExtractStats,
}

/// Counters collected while extracting one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    /// `div.message` elements seen
    pub elements: usize,
    /// Placeholder entries skipped without a report
    pub skipped: usize,
    /// Messages retained
    pub retained: usize,
    /// Messages dropped with an issue
    pub dropped: usize,
    /// Attachments kept on retained messages
    pub attachments: usize,
    /// Attachments dropped with an issue
    pub attachments_dropped: usize,
}

impl ExtractStats {
    /// Adds another document's counters to this one.
    pub fn absorb(&mut self, other: &ExtractStats) {
        self.elements += other.elements;
        self.skipped += other.skipped;
        self.retained += other.retained;
        self.dropped += other.dropped;
        self.attachments += other.attachments;
        self.attachments_dropped += other.attachments_dropped;
    }
}

/// A message or attachment that did not make it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractIssue {
    /// Position of the message element in the document (0-based, counting
    /// every `div.message`).
    pub index: usize,
    /// Parsed element id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    /// What went wrong.
    pub kind: IssueKind,
}

impl Extraction {
    /// Records an issue and counts it as a dropped message or a dropped
    /// attachment depending on its kind.
    pub fn record(&mut self, index: usize, source_id: Option<i64>, kind: IssueKind) {
        if kind.drops_message() {
            self.stats.dropped += 1;
        } else {
            self.stats.attachments_dropped += 1;
        }
        self.issues.push(ExtractIssue::new(index, source_id, kind));
    }
}

impl ExtractIssue {
    pub fn new(index: usize, source_id: Option<i64>, kind: IssueKind) -> Self {
        Self {
            index,
            source_id,
            kind,
        }
    }
}

/// Why a message or attachment was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    /// The element is missing an expected sub-structure or holds garbage.
    Structural {
        reason: String,
        /// Outer HTML of the message element.
        fragment: String,
    },
    /// No sender block and not a continuation.
    OrphanedSender,
    /// A continuation with no retained message before it.
    OrphanedContinuation,
    /// A message whose time could not be resolved at all.
    MissingTimestamp,
    /// Pins, joins, calls and similar entries without a sender.
    ServiceEntry,
    /// An attachment link with no known media class.
    UnclassifiableMedia {
        display_date: String,
        display_time: String,
        attributes: String,
    },
    /// An attachment link without a target.
    MissingHref { attributes: String },
    /// An attachment link pointing outside the export directory.
    ForeignHref { href: String },
}

impl IssueKind {
    /// `true` if the whole message was dropped, `false` if only one
    /// attachment was.
    pub fn drops_message(&self) -> bool {
        !matches!(
            self,
            IssueKind::UnclassifiableMedia { .. }
                | IssueKind::MissingHref { .. }
                | IssueKind::ForeignHref { .. }
        )
    }

    /// Short label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::Structural { .. } => "structural",
            IssueKind::OrphanedSender => "orphaned sender",
            IssueKind::OrphanedContinuation => "orphaned continuation",
            IssueKind::MissingTimestamp => "missing timestamp",
            IssueKind::ServiceEntry => "service entry",
            IssueKind::UnclassifiableMedia { .. } => "unclassifiable media",
            IssueKind::MissingHref { .. } => "attachment without href",
            IssueKind::ForeignHref { .. } => "href outside export",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_message() {
        assert!(IssueKind::OrphanedSender.drops_message());
        assert!(IssueKind::MissingTimestamp.drops_message());
        assert!(
            !IssueKind::UnclassifiableMedia {
                display_date: String::new(),
                display_time: String::new(),
                attributes: String::new(),
            }
            .drops_message()
        );
        assert!(!IssueKind::MissingHref { attributes: String::new() }.drops_message());
        assert!(!IssueKind::ForeignHref { href: "../x".into() }.drops_message());
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = ExtractStats::default();
        let one = ExtractStats {
            elements: 3,
            skipped: 1,
            retained: 1,
            dropped: 1,
            attachments: 2,
            attachments_dropped: 1,
        };
        total.absorb(&one);
        total.absorb(&one);
        assert_eq!(total.elements, 6);
        assert_eq!(total.attachments, 4);
    }

    #[test]
    fn test_issue_serialization() {
        let issue = ExtractIssue::new(4, Some(12), IssueKind::OrphanedContinuation);
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"index\":4"));
        assert!(json.contains("\"type\":\"orphaned_continuation\""));
    }
}
