//! Shared helpers for reading Telegram Desktop HTML exports.
//!
//! A message in the export looks like this:
//!
//! ```html
//! <div class="message default clearfix" id="message42">
//!   <div class="body">
//!     <div class="pull_right date details" title="01.02.2023 10:00:00 UTC+03:00">10:00</div>
//!     <div class="from_name">Alice</div>
//!     <div class="media_wrap clearfix">
//!       <a class="photo_wrap clearfix pull_left" href="photos/photo_1.jpg">...</a>
//!     </div>
//!     <div class="text">Hello</div>
//!   </div>
//! </div>
//! ```
//!
//! Follow-up messages from the same sender carry the extra `joined` class and
//! have no `from_name`. Date separators are `service` entries with the id
//! `message-1`.

use std::path::{Component, Path};
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Node, Selector};

use crate::message::RawAttachment;

/// Format of the `title` attribute on the date block.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S UTC%z";

/// Same as [`EXPORT_TIMESTAMP_FORMAT`] with a colon in the offset.
const EXPORT_TIMESTAMP_FORMAT_COLON: &str = "%d.%m.%Y %H:%M:%S UTC%:z";

/// Class on a message element whose header was omitted.
pub const CONTINUATION_CLASS: &str = "joined";

/// Class on service entries (pins, joins, date separators).
pub const SERVICE_CLASS: &str = "service";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

pub(crate) static MESSAGE: LazyLock<Selector> = LazyLock::new(|| selector("div.message"));
pub(crate) static FROM_NAME: LazyLock<Selector> = LazyLock::new(|| selector("div.from_name"));
pub(crate) static DATE: LazyLock<Selector> =
    LazyLock::new(|| selector("div.pull_right.date.details"));
pub(crate) static TEXT: LazyLock<Selector> = LazyLock::new(|| selector("div.text"));
pub(crate) static MEDIA_WRAP: LazyLock<Selector> = LazyLock::new(|| selector("div.media_wrap"));
pub(crate) static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// Parses the numeric id out of an element id such as `message42`.
///
/// Returns `None` for a missing or malformed id and for negative ids, which
/// the export uses for placeholder entries. Such entries are skipped.
///
/// ```rust
/// use chatport::parsing::parse_source_id;
///
/// assert_eq!(parse_source_id(Some("message42")), Some(42));
/// assert_eq!(parse_source_id(Some("message-1")), None);
/// assert_eq!(parse_source_id(Some("go_to_message7")), None);
/// assert_eq!(parse_source_id(None), None);
/// ```
pub fn parse_source_id(id_attr: Option<&str>) -> Option<i64> {
    let id = id_attr?.strip_prefix("message")?.parse::<i64>().ok()?;
    (id >= 0).then_some(id)
}

/// Parses a date block title like `01.02.2023 10:00:00 UTC+0000`.
///
/// Both `UTC+0300` and `UTC+03:00` offsets are accepted. The offset is kept
/// so that display fields stay in the export's local time.
///
/// ```rust
/// use chatport::parsing::parse_export_timestamp;
///
/// let ts = parse_export_timestamp("01.02.2023 10:00:00 UTC+03:00").unwrap();
/// assert_eq!(ts.format("%d.%m.%Y %H:%M:%S").to_string(), "01.02.2023 10:00:00");
/// assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
/// ```
pub fn parse_export_timestamp(title: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let title = title.trim();
    DateTime::parse_from_str(title, EXPORT_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_str(title, EXPORT_TIMESTAMP_FORMAT_COLON))
}

/// Returns `true` if the element's class list contains `class`.
pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Rendered text of an element: text nodes concatenated, `<br>` as newline,
/// surrounding whitespace trimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Collects an attachment link's href, classes and attributes.
pub fn raw_attachment(link: &ElementRef<'_>) -> RawAttachment {
    let value = link.value();
    RawAttachment {
        href: value.attr("href").map(ToString::to_string),
        classes: value.classes().map(ToString::to_string).collect(),
        attributes: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// `true` if `href` points at a file inside the export directory: a
/// relative path without `..` components and without a URL scheme.
///
/// ```rust
/// use chatport::parsing::is_local_href;
///
/// assert!(is_local_href("photos/photo_1.jpg"));
/// assert!(!is_local_href("../secret.txt"));
/// assert!(!is_local_href("/etc/passwd"));
/// assert!(!is_local_href("https://t.me/file.jpg"));
/// ```
pub fn is_local_href(href: &str) -> bool {
    if href.starts_with(['/', '\\']) {
        return false;
    }
    let mut segments = href.split(['/', '\\']);
    let first = segments.next().unwrap_or_default();
    !first.contains(':')
        && first != ".."
        && segments.all(|segment| segment != "..")
        && Path::new(href)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Truncates an HTML dump to at most `limit` characters.
pub fn truncate_fragment(fragment: &str, limit: usize) -> String {
    match fragment.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}…", &fragment[..byte_idx]),
        None => fragment.to_string(),
    }
}
