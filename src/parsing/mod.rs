//! Shared parsing utilities.
//!
//! Low-level helpers used by the extractor in [`crate::parsers`]: selectors,
//! id and timestamp parsing, text and attachment extraction.

pub mod telegram_html;

// Re-export commonly used items
pub use telegram_html::{
    CONTINUATION_CLASS, EXPORT_TIMESTAMP_FORMAT, SERVICE_CLASS, element_text, has_class,
    is_local_href, parse_export_timestamp, parse_source_id, raw_attachment, truncate_fragment,
};
