//! Zip archive writer.
//!
//! Layout of the archive:
//!
//! ```text
//! IMG-20230201-WA0000.jpg   <- media entries, in chat order
//! VID-20230201-WA0001.mp4
//! _chat.txt                 <- chat log, always last
//! ```
//!
//! A media file that cannot be read is logged and left out; the archive is
//! still produced. Only failures of the zip writer itself are fatal.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::ArchiveConfig;
use crate::core::models::RenderedChat;
use crate::diagnostics::Diagnostics;
use crate::error::{ChatportError, Result};

/// A media file that could not be packed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMedia {
    /// Entry name that would have been used.
    pub assigned_name: String,
    /// Resolved source path.
    pub source: PathBuf,
    /// Why it could not be read.
    pub reason: String,
}

/// What ended up inside an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    /// Final archive location (empty for in-memory archives).
    pub path: PathBuf,
    /// Media entries written.
    pub media_written: usize,
    /// Media entries left out.
    pub media_missing: Vec<MissingMedia>,
    /// Size of the chat log entry in bytes.
    pub chat_bytes: usize,
}

/// Packs rendered chats and their media into a zip archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    config: ArchiveConfig,
    diagnostics: Diagnostics,
}

impl ArchiveBuilder {
    pub fn new(config: ArchiveConfig, diagnostics: Diagnostics) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Writes the archive to `destination`.
    ///
    /// The archive is assembled in a sibling `.part` file and moved into
    /// place only after the zip directory has been written, so an archive at
    /// `destination` is always complete. The `.part` file is removed if
    /// anything fails.
    pub fn build(
        &self,
        chats: &[RenderedChat],
        base_dir: &Path,
        destination: &Path,
    ) -> Result<ArchiveSummary> {
        let part = part_path(destination);
        let file = File::create(&part)
            .map_err(|e| ChatportError::archive(destination, zip::result::ZipError::Io(e)))?;

        let result = self
            .write_to(BufWriter::new(file), destination, chats, base_dir)
            .and_then(|(writer, summary)| {
                writer
                    .into_inner()
                    .map_err(|e| ChatportError::archive(destination, e.into_error().into()))?;
                fs::rename(&part, destination)
                    .map_err(|e| ChatportError::archive(destination, e.into()))?;
                Ok(summary)
            });

        match result {
            Ok(mut summary) => {
                summary.path = destination.to_path_buf();
                Ok(summary)
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                Err(e)
            }
        }
    }

    /// Writes the archive into any seekable writer and returns it together
    /// with a summary. `archive_path` is only used for error context.
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: W,
        archive_path: &Path,
        chats: &[RenderedChat],
        base_dir: &Path,
    ) -> Result<(W, ArchiveSummary)> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(self.config.compression.method());
        let mut summary = ArchiveSummary::default();
        let mut written: BTreeSet<&str> = BTreeSet::new();

        for entry in chats.iter().flat_map(|chat| &chat.media) {
            let name = entry.assigned_name.as_str();
            if name == self.config.chat_entry_name || written.contains(name) {
                self.diagnostics.duplicate_entry(name);
                continue;
            }

            let source = base_dir.join(&entry.original_path);
            // No entry is started for a source that could not be read.
            let bytes = match fs::read(&source) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.diagnostics.missing_media(&source, name, &e);
                    summary.media_missing.push(MissingMedia {
                        assigned_name: name.to_string(),
                        source,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            self.diagnostics.media_added(&source, name);
            zip.start_file(name, options)
                .map_err(|e| ChatportError::archive(archive_path, e))?;
            zip.write_all(&bytes)
                .map_err(|e| ChatportError::archive_entry(name, e))?;
            written.insert(name);
            summary.media_written += 1;
        }

        let chat_name = self.config.chat_entry_name.as_str();
        zip.start_file(chat_name, options)
            .map_err(|e| ChatportError::archive(archive_path, e))?;
        for chat in chats {
            zip.write_all(chat.text.as_bytes())
                .map_err(|e| ChatportError::archive_entry(chat_name, e))?;
            summary.chat_bytes += chat.text.len();
        }

        let writer = zip
            .finish()
            .map_err(|e| ChatportError::archive(archive_path, e))?;
        Ok((writer, summary))
    }
}

/// `out/Chat.zip` -> `out/Chat.zip.part`
fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
