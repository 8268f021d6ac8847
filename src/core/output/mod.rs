//! Output writers.
//!
//! - [`ArchiveBuilder`] - packs the chat log and media into a WhatsApp-style zip
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatport::Result<()> {
//! use chatport::config::ArchiveConfig;
//! use chatport::core::RenderedChat;
//! use chatport::core::output::ArchiveBuilder;
//! use chatport::diagnostics::Diagnostics;
//! use std::path::Path;
//!
//! let mut chat = RenderedChat::new();
//! chat.push_line("[01.02.2023, 10:00:00] Alice: Hello");
//!
//! let builder = ArchiveBuilder::new(ArchiveConfig::new(), Diagnostics::default());
//! let summary = builder.build(&[chat], Path::new("export"), Path::new("Whatsapp Chat - Alice.zip"))?;
//! println!("{} media files packed", summary.media_written);
//! # Ok(())
//! # }
//! ```

mod archive;

pub use archive::{ArchiveBuilder, ArchiveSummary, MissingMedia};
