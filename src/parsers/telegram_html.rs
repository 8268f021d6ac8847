//! Telegram Desktop HTML export extractor.
//!
//! Walks every `div.message` element in document order and turns it into one
//! of three outcomes: a retained [`Message`], a silent skip (placeholder
//! entries with a negative or missing id), or a dropped entry described by an
//! [`ExtractIssue`](super::ExtractIssue). A malformed message never aborts the walk.
//!
//! Media attachments are named while extracting, so the caller passes the
//! run's [`MediaNamer`] in explicitly.

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};

use super::{Extraction, IssueKind};
use crate::Message;
use crate::core::media::{MediaKind, MediaNamer};
use crate::message::MediaAttachment;
use crate::parsing::telegram_html::{self as html, CONTINUATION_CLASS, SERVICE_CLASS};

/// Extractor for Telegram HTML exports.
///
/// # Example
///
/// ```rust
/// use chatport::core::media::MediaNamer;
/// use chatport::parsers::TelegramHtmlExtractor;
///
/// let page = r#"
/// <div class="message default clearfix" id="message1">
///   <div class="pull_right date details" title="01.02.2023 10:00:00 UTC+0000">10:00</div>
///   <div class="from_name">Alice</div>
///   <div class="text">Hello</div>
/// </div>"#;
///
/// let mut namer = MediaNamer::new();
/// let extraction = TelegramHtmlExtractor::new().extract_str(page, &mut namer);
///
/// assert_eq!(extraction.messages.len(), 1);
/// assert_eq!(extraction.messages[0].sender, "Alice");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramHtmlExtractor;

/// Outcome of one message element.
enum Outcome {
    Retained(Message),
    Skipped,
    Dropped(IssueKind),
}

/// Sender and timestamp a message renders with.
#[derive(Clone)]
struct Header {
    sender: String,
    timestamp: Option<DateTime<FixedOffset>>,
}

impl TelegramHtmlExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses `content` as HTML and extracts its messages.
    pub fn extract_str(&self, content: &str, namer: &mut MediaNamer) -> Extraction {
        let document = Html::parse_document(content);
        self.extract_document(&document, namer)
    }

    /// Extracts messages from an already parsed document.
    ///
    /// Continuation messages inherit from the last message retained from
    /// this document; inheritance never crosses document boundaries.
    pub fn extract_document(&self, document: &Html, namer: &mut MediaNamer) -> Extraction {
        let mut extraction = Extraction::default();
        let mut previous: Option<Header> = None;

        for (index, element) in document.select(&html::MESSAGE).enumerate() {
            extraction.stats.elements += 1;
            let source_id = html::parse_source_id(element.value().attr("id"));

            let mut attachment_issues = Vec::new();
            let outcome = Self::extract_message(
                &element,
                source_id,
                previous.as_ref(),
                namer,
                &mut attachment_issues,
            );

            for kind in attachment_issues {
                extraction.record(index, source_id, kind);
            }

            match outcome {
                Outcome::Retained(message) => {
                    previous = Some(Header {
                        sender: message.sender.clone(),
                        timestamp: message.timestamp,
                    });
                    extraction.stats.retained += 1;
                    extraction.stats.attachments += message.media.len();
                    extraction.messages.push(message);
                }
                Outcome::Skipped => extraction.stats.skipped += 1,
                Outcome::Dropped(kind) => extraction.record(index, source_id, kind),
            }
        }

        extraction
    }

    fn extract_message(
        element: &ElementRef<'_>,
        source_id: Option<i64>,
        previous: Option<&Header>,
        namer: &mut MediaNamer,
        attachment_issues: &mut Vec<IssueKind>,
    ) -> Outcome {
        let Some(source_id) = source_id else {
            return Outcome::Skipped;
        };

        let is_continuation = html::has_class(element, CONTINUATION_CLASS);

        let header = if is_continuation {
            match previous {
                Some(header) => header.clone(),
                None => return Outcome::Dropped(IssueKind::OrphanedContinuation),
            }
        } else {
            let Some(from) = element.select(&html::FROM_NAME).next() else {
                return Outcome::Dropped(if html::has_class(element, SERVICE_CLASS) {
                    IssueKind::ServiceEntry
                } else {
                    IssueKind::OrphanedSender
                });
            };
            let sender = html::element_text(&from);

            let timestamp = match element.select(&html::DATE).next() {
                Some(date) => match date.value().attr("title") {
                    Some(title) => match html::parse_export_timestamp(title) {
                        Ok(ts) => Some(ts),
                        Err(e) => {
                            return Outcome::Dropped(IssueKind::Structural {
                                reason: format!("unparseable timestamp '{title}': {e}"),
                                fragment: element.html(),
                            });
                        }
                    },
                    None => {
                        return Outcome::Dropped(IssueKind::Structural {
                            reason: "date block has no title attribute".to_string(),
                            fragment: element.html(),
                        });
                    }
                },
                None => None,
            };

            Header { sender, timestamp }
        };

        if header.sender.is_empty() {
            return Outcome::Dropped(IssueKind::OrphanedSender);
        }
        let Some(timestamp) = header.timestamp else {
            return Outcome::Dropped(IssueKind::MissingTimestamp);
        };

        let mut message = Message::new(header.sender)
            .with_source_id(source_id)
            .with_timestamp(timestamp);
        if is_continuation {
            message = message.continuation();
        }

        if let Some(text) = element.select(&html::TEXT).next() {
            message = message.with_text(html::element_text(&text));
        }

        let wrap = element.select(&html::MEDIA_WRAP).next();
        if let (Some(wrap), Some(date)) = (wrap, message.date_key()) {
            let display_date = message.display_date().unwrap_or_default();
            let display_time = message.display_time().unwrap_or_default();

            for link in wrap.select(&html::LINK) {
                let raw = html::raw_attachment(&link);
                let Some(category) = MediaKind::from_classes(raw.class_list()).category() else {
                    attachment_issues.push(IssueKind::UnclassifiableMedia {
                        display_date: display_date.clone(),
                        display_time: display_time.clone(),
                        attributes: raw.attribute_dump(),
                    });
                    continue;
                };
                let Some(href) = raw.href.as_deref().filter(|h| !h.is_empty()) else {
                    attachment_issues.push(IssueKind::MissingHref {
                        attributes: raw.attribute_dump(),
                    });
                    continue;
                };
                if !html::is_local_href(href) {
                    attachment_issues.push(IssueKind::ForeignHref {
                        href: href.to_string(),
                    });
                    continue;
                }
                let assigned_name = namer.assign(category, date, href);
                message.media.push(MediaAttachment::new(category, href, assigned_name));
            }
        }

        Outcome::Retained(message)
    }
}
