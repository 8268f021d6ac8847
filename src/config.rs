//! Configuration types for the conversion pipeline.
//!
//! Plain structs with builder methods and serde support, free of any CLI
//! framework dependency:
//!
//! - [`ArchiveConfig`] - archive naming and entry layout
//! - [`DiagnosticsConfig`] - how much detail issue logs carry
//! - [`ConvertConfig`] - everything a [`Converter`](crate::batch::Converter) needs
//!
//! # Example
//!
//! ```rust
//! use chatport::config::{ArchiveConfig, ConvertConfig, DiagnosticsConfig};
//!
//! let config = ConvertConfig::new()
//!     .with_archive(ArchiveConfig::new().with_chat_entry_name("chat.txt"))
//!     .with_diagnostics(DiagnosticsConfig::new().with_dump_fragments(false))
//!     .with_output_dir("out");
//!
//! assert_eq!(config.archive.chat_entry_name, "chat.txt");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Compression used for archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Deflate (what WhatsApp itself produces)
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Configuration for the output archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Name of the chat log entry (default: `_chat.txt`)
    pub chat_entry_name: String,

    /// Prefix of the archive file name (default: `Whatsapp Chat - `)
    pub archive_prefix: String,

    /// Entry compression (default: deflated)
    pub compression: Compression,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            chat_entry_name: "_chat.txt".to_string(),
            archive_prefix: "Whatsapp Chat - ".to_string(),
            compression: Compression::Deflated,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chat log entry name.
    #[must_use]
    pub fn with_chat_entry_name(mut self, name: impl Into<String>) -> Self {
        self.chat_entry_name = name.into();
        self
    }

    /// Sets the archive file name prefix.
    #[must_use]
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Sets the entry compression.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Archive file name for a chat called `title`.
    ///
    /// ```rust
    /// use chatport::config::ArchiveConfig;
    ///
    /// assert_eq!(ArchiveConfig::new().archive_file_name("Alice"), "Whatsapp Chat - Alice.zip");
    /// ```
    pub fn archive_file_name(&self, title: &str) -> String {
        format!("{}{}.zip", self.archive_prefix, title)
    }
}

/// Controls the detail of per-message issue logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Include the offending HTML fragment in structural error logs (default: true)
    pub dump_fragments: bool,

    /// Maximum characters of a fragment dump (default: 4000)
    pub fragment_limit: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            dump_fragments: true,
            fragment_limit: 4000,
        }
    }
}

impl DiagnosticsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables fragment dumps.
    #[must_use]
    pub fn with_dump_fragments(mut self, enabled: bool) -> Self {
        self.dump_fragments = enabled;
        self
    }

    /// Sets the fragment dump limit.
    #[must_use]
    pub fn with_fragment_limit(mut self, limit: usize) -> Self {
        self.fragment_limit = limit;
        self
    }
}

/// Configuration for a whole conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Archive layout
    pub archive: ArchiveConfig,

    /// Logging detail
    pub diagnostics: DiagnosticsConfig,

    /// Directory for the archive. Defaults to the parent of the export directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Chat name used in the archive file name. Defaults to the input name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub chat_name: Option<String>,
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive configuration.
    #[must_use]
    pub fn with_archive(mut self, archive: ArchiveConfig) -> Self {
        self.archive = archive;
        self
    }

    /// Sets the diagnostics configuration.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Overrides the chat name in the archive file name.
    #[must_use]
    pub fn with_chat_name(mut self, name: impl Into<String>) -> Self {
        self.chat_name = Some(name.into());
        self
    }
}
