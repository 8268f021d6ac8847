//! # Chatport
//!
//! A Rust library for moving chat history from Telegram to WhatsApp.
//!
//! ## Overview
//!
//! Telegram Desktop exports a chat as one or more HTML pages
//! (`messages.html`, `messages2.html`, ...) next to folders of photos, videos
//! and files. WhatsApp imports a chat from a zip holding a plain-text
//! `_chat.txt` log plus media files named like `IMG-20230201-WA0000.jpg`.
//! Chatport converts the former into the latter:
//!
//! 1. every `div.message` is extracted into a [`Message`], with continuation
//!    messages inheriting sender and timestamp from the message before them
//! 2. each attachment is classified and given a WhatsApp file name from a
//!    per-day counter shared across all pages
//! 3. messages are rendered as `[dd.mm.yyyy, hh:mm:ss] Sender: text` lines
//! 4. media and the chat log are packed into `Whatsapp Chat - {name}.zip`
//!
//! Malformed messages and missing media files are logged and skipped; only
//! unreadable input or an unwritable archive stop a run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatport::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new(ConvertConfig::new());
//!     let report = converter.convert(&InputSource::Directory("ChatExport_2023-02-01".into()))?;
//!
//!     println!("{} media files packed", report.archive.media_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`batch`] - [`Converter`](batch::Converter), input discovery and ordering
//! - [`parsers`] - [`TelegramHtmlExtractor`](parsers::TelegramHtmlExtractor) and extraction issues
//! - [`parsing`] - Selectors and helpers for the Telegram HTML markup
//! - [`core`] - Media naming, rendered chats and the zip writer
//! - [`format`] - WhatsApp chat log rendering
//! - [`diagnostics`] - Logging of non-fatal conditions
//! - [`config`] - Configuration types
//! - [`report`] - Per-run reports
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ChatportError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod message;
pub mod parsers;
pub mod parsing;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use error::{ChatportError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatport::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChatportError, Result};

    pub use crate::batch::{Converter, InputSource, discover_inputs};
    pub use crate::config::{ArchiveConfig, Compression, ConvertConfig, DiagnosticsConfig};
    pub use crate::core::{ArchiveBuilder, MediaCategory, MediaKind, MediaNamer, RenderedChat};
    pub use crate::diagnostics::Diagnostics;
    pub use crate::format::ChatFormatter;
    pub use crate::message::{MediaAttachment, RawAttachment};
    pub use crate::parsers::{ExtractIssue, Extraction, IssueKind, TelegramHtmlExtractor};
    pub use crate::report::{FileReport, RunReport};
}
