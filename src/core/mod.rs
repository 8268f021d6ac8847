//! Core pipeline pieces that do not depend on the input format.
//!
//! This module contains:
//! - [`media`] - Media classification and the per-day file namer
//! - [`models`] - [`RenderedChat`] and [`MediaEntry`]
//! - [`output`] - The zip [`ArchiveBuilder`](output::ArchiveBuilder)

pub mod media;
pub mod models;
pub mod output;

// Re-export main types for convenience
pub use media::{MediaCategory, MediaKind, MediaNamer};
pub use models::{MediaEntry, RenderedChat};
pub use output::{ArchiveBuilder, ArchiveSummary, MissingMedia};
