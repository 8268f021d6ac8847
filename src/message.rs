//! Normalized chat records.
//!
//! This module provides [`Message`], one retained chat entry extracted from a
//! Telegram HTML export, together with the attachment types it carries:
//!
//! - [`RawAttachment`] - an attachment link exactly as found in the markup
//! - [`MediaAttachment`] - a classified attachment with its generated name
//!
//! # Examples
//!
//! ```
//! use chatport::Message;
//! use chrono::{FixedOffset, TimeZone};
//!
//! let ts = FixedOffset::east_opt(0)
//!     .unwrap()
//!     .with_ymd_and_hms(2023, 2, 1, 10, 0, 0)
//!     .unwrap();
//!
//! let msg = Message::new("Alice")
//!     .with_timestamp(ts)
//!     .with_text("Hello");
//!
//! assert_eq!(msg.display_date().as_deref(), Some("01.02.2023"));
//! assert_eq!(msg.display_time().as_deref(), Some("10:00:00"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::media::MediaCategory;

/// Date layout used by the WhatsApp chat log (`01.02.2023`).
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Time layout used by the WhatsApp chat log (`10:00:00`).
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M:%S";

/// A chat entry that survived extraction.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `source_id` | `Option<i64>` | Numeric part of the element id (`message42`) |
/// | `sender` | `String` | Display name of the author |
/// | `timestamp` | `Option<DateTime<FixedOffset>>` | Send time in the export's offset |
/// | `is_continuation` | `bool` | Header was inherited from the previous message |
/// | `text` | `Option<String>` | Plain text body |
/// | `media` | `Vec<MediaAttachment>` | Classified attachments in document order |
///
/// The timestamp is kept in the offset written by the export, so the
/// display date and time match what the user saw in Telegram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Numeric message identifier from the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub source_id: Option<i64>,

    /// Display name of the message author.
    pub sender: String,

    /// When the message was sent.
    ///
    /// Always present for messages returned by the extractor.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// `true` when sender and timestamp were inherited from the previous
    /// retained message (a "joined" entry in the export).
    #[serde(default)]
    pub is_continuation: bool,

    /// Plain text body. `None` for media-only entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub text: Option<String>,

    /// Attachments that could be classified.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl Message {
    /// Creates a message with only a sender.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            source_id: None,
            sender: sender.into(),
            timestamp: None,
            is_continuation: false,
            text: None,
            media: Vec::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder method to set the source identifier.
    #[must_use]
    pub fn with_source_id(mut self, id: i64) -> Self {
        self.source_id = Some(id);
        self
    }

    /// Builder method to set the text body.
    ///
    /// Whitespace-only text is treated as absent.
    ///
    /// ```rust
    /// use chatport::Message;
    ///
    /// assert!(Message::new("Bob").with_text("   ").text.is_none());
    /// ```
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Builder method to append an attachment.
    #[must_use]
    pub fn with_media(mut self, attachment: MediaAttachment) -> Self {
        self.media.push(attachment);
        self
    }

    /// Builder method to mark the message as a continuation.
    #[must_use]
    pub fn continuation(mut self) -> Self {
        self.is_continuation = true;
        self
    }

    // =========================================================================
    // Derived display fields
    // =========================================================================

    /// Calendar day of the message in the export's offset.
    ///
    /// Used to key the per-day media sequence counters.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date_naive())
    }

    /// Date as printed in the chat log, e.g. `01.02.2023`.
    pub fn display_date(&self) -> Option<String> {
        self.timestamp
            .map(|ts| ts.format(DISPLAY_DATE_FORMAT).to_string())
    }

    /// Time as printed in the chat log, e.g. `10:00:00`.
    pub fn display_time(&self) -> Option<String> {
        self.timestamp
            .map(|ts| ts.format(DISPLAY_TIME_FORMAT).to_string())
    }

    /// Returns `true` if the message would render no lines.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.media.is_empty()
    }
}

/// An attachment link as found inside a message's media block.
///
/// Nothing has been decided about it yet; the attribute map is kept so that
/// an unclassifiable link can be reported verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttachment {
    /// `href` attribute, relative to the export directory.
    pub href: Option<String>,

    /// Entries of the `class` attribute in document order.
    pub classes: Vec<String>,

    /// Every attribute of the link element.
    pub attributes: BTreeMap<String, String>,
}

impl RawAttachment {
    /// Class list as string slices.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Renders the attribute map as `key="value"` pairs for log output.
    pub fn attribute_dump(&self) -> String {
        self.attributes
            .iter()
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A classified attachment with its archive entry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Image, video or document.
    pub category: MediaCategory,

    /// Location of the file relative to the export's base directory.
    pub original_path: String,

    /// Generated name, unique within the run (`IMG-20230201-WA0000.jpg`).
    pub assigned_name: String,
}

impl MediaAttachment {
    pub fn new(
        category: MediaCategory,
        original_path: impl Into<String>,
        assigned_name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            original_path: original_path.into(),
            assigned_name: assigned_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(offset_secs: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new("Alice");
        assert_eq!(msg.sender, "Alice");
        assert!(msg.timestamp.is_none());
        assert!(msg.text.is_none());
        assert!(msg.media.is_empty());
        assert!(!msg.is_continuation);
        assert!(msg.is_empty());
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::new("Alice")
            .with_source_id(42)
            .with_timestamp(ts(0, 2023, 2, 1, 10, 0, 0))
            .with_text("  Hello  ")
            .continuation();

        assert_eq!(msg.source_id, Some(42));
        assert_eq!(msg.text.as_deref(), Some("Hello"));
        assert!(msg.is_continuation);
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_display_fields_use_export_offset() {
        // 23:30 at +03:00 is still the 1st locally, even though UTC is the 1st 20:30.
        let msg = Message::new("Alice").with_timestamp(ts(3 * 3600, 2023, 2, 1, 23, 30, 5));
        assert_eq!(msg.display_date().as_deref(), Some("01.02.2023"));
        assert_eq!(msg.display_time().as_deref(), Some("23:30:05"));
        assert_eq!(msg.date_key(), NaiveDate::from_ymd_opt(2023, 2, 1));
    }

    #[test]
    fn test_display_fields_absent_without_timestamp() {
        let msg = Message::new("Alice");
        assert!(msg.display_date().is_none());
        assert!(msg.display_time().is_none());
        assert!(msg.date_key().is_none());
    }

    #[test]
    fn test_raw_attachment_dump() {
        let raw = RawAttachment {
            href: Some("photos/a.jpg".to_string()),
            classes: vec!["photo_wrap".to_string(), "clearfix".to_string()],
            attributes: BTreeMap::from([
                ("href".to_string(), "photos/a.jpg".to_string()),
                ("class".to_string(), "photo_wrap clearfix".to_string()),
            ]),
        };
        assert_eq!(raw.class_list().collect::<Vec<_>>(), vec!["photo_wrap", "clearfix"]);
        let dump = raw.attribute_dump();
        assert!(dump.contains("href=\"photos/a.jpg\""));
        assert!(dump.contains("class=\"photo_wrap clearfix\""));
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new("Alice").with_text("Hi").with_source_id(7);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Alice"));
        assert!(json.contains("\"source_id\":7"));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("media"));
    }
}
