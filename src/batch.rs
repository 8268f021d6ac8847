//! Batch driver.
//!
//! Runs the whole pipeline for one export: finds the input files, extracts
//! and renders each one in order with a single shared [`MediaNamer`], then
//! packs everything into one archive.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatport::Result<()> {
//! use chatport::batch::{Converter, InputSource};
//! use chatport::config::ConvertConfig;
//!
//! let converter = Converter::new(ConvertConfig::new().with_output_dir("out"));
//! let report = converter.convert(&InputSource::Directory("ChatExport_2023-02-01".into()))?;
//! println!("archive: {}", report.archive.path.display());
//! # Ok(())
//! # }
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::config::ConvertConfig;
use crate::core::media::MediaNamer;
use crate::core::models::RenderedChat;
use crate::core::output::ArchiveBuilder;
use crate::diagnostics::Diagnostics;
use crate::error::{ChatportError, Result};
use crate::format::ChatFormatter;
use crate::parsers::TelegramHtmlExtractor;
use crate::report::{FileReport, RunReport};

static EXPORT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\D*(\d*)\.html$").expect("valid export file pattern"));

/// What to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A single export page
    File(PathBuf),
    /// An export directory with one or more `*.html` pages
    Directory(PathBuf),
}

impl InputSource {
    /// Directory that media paths in the export are relative to.
    pub fn base_dir(&self) -> PathBuf {
        match self {
            InputSource::File(path) => non_empty(path.parent()),
            InputSource::Directory(dir) => dir.clone(),
        }
    }

    /// Chat name derived from the input: the file stem or the directory name.
    pub fn title(&self) -> Result<String> {
        let (path, name) = match self {
            InputSource::File(path) => (path, path.file_stem()),
            InputSource::Directory(dir) => (dir, dir.file_name()),
        };
        if let Some(name) = name {
            return Ok(name.to_string_lossy().into_owned());
        }
        // `.` or `..` have no name of their own.
        let resolved = fs::canonicalize(path).map_err(|e| ChatportError::read_input(path, e))?;
        resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ChatportError::invalid_input(path, "cannot derive a chat name"))
    }

    /// Where the archive goes unless an output directory is configured:
    /// the parent of [`base_dir`](Self::base_dir).
    pub fn default_output_dir(&self) -> PathBuf {
        let base = self.base_dir();
        if base == Path::new(".") {
            return base;
        }
        non_empty(base.parent())
    }

    /// Input pages in processing order.
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        match self {
            InputSource::File(path) => {
                if path.is_dir() {
                    return Err(ChatportError::invalid_input(
                        path,
                        "expected a file, got a directory (use --dir)",
                    ));
                }
                Ok(vec![path.clone()])
            }
            InputSource::Directory(dir) => discover_inputs(dir),
        }
    }
}

/// Replaces path separators so a chat name can only ever name a file.
fn file_name_safe(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

fn non_empty(path: Option<&Path>) -> PathBuf {
    match path {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Number embedded before the `.html` extension.
///
/// ```rust
/// use chatport::batch::export_sequence;
///
/// assert_eq!(export_sequence("messages.html"), 0);
/// assert_eq!(export_sequence("messages2.html"), 2);
/// assert_eq!(export_sequence("messages10.html"), 10);
/// ```
pub fn export_sequence(file_name: &str) -> u64 {
    EXPORT_FILE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

/// Lists the `*.html` files directly inside `dir`, ordered by
/// [`export_sequence`] and then by name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ChatportError::read_input(dir, e))?;

    let mut files: Vec<(u64, String, PathBuf)> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ChatportError::read_input(dir, e))?.path();
        if !path.is_file() || !is_html(&path) {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push((export_sequence(&name), name, path));
    }

    if files.is_empty() {
        return Err(ChatportError::NoInputFiles {
            dir: dir.to_path_buf(),
        });
    }
    files.sort();
    Ok(files.into_iter().map(|(_, _, path)| path).collect())
}

/// Runs extraction, rendering and archiving for one export.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
    diagnostics: Diagnostics,
    extractor: TelegramHtmlExtractor,
    formatter: ChatFormatter,
    archiver: ArchiveBuilder,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        let diagnostics = Diagnostics::new(config.diagnostics.clone());
        Self {
            extractor: TelegramHtmlExtractor::new(),
            formatter: ChatFormatter::new(diagnostics.clone()),
            archiver: ArchiveBuilder::new(config.archive.clone(), diagnostics.clone()),
            diagnostics,
            config,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Where the archive for `source` will be written.
    pub fn archive_path(&self, source: &InputSource) -> Result<PathBuf> {
        let title = match &self.config.chat_name {
            Some(name) => name.clone(),
            None => source.title()?,
        };
        let title = file_name_safe(&title);
        let dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| source.default_output_dir());
        Ok(dir.join(self.config.archive.archive_file_name(&title)))
    }

    /// Extracts and renders one page. `label` is only used in logs and the
    /// report.
    pub fn process_html(
        &self,
        label: &Path,
        content: &str,
        namer: &mut MediaNamer,
    ) -> (RenderedChat, FileReport) {
        let extraction = self.extractor.extract_str(content, namer);
        self.diagnostics.report_extraction(label, &extraction);

        let chat = self.formatter.render(&extraction.messages);
        let report = FileReport {
            path: label.to_path_buf(),
            stats: extraction.stats,
            lines: chat.line_count(),
            issues: extraction.issues,
        };
        (chat, report)
    }

    /// Reads, extracts and renders every file in order.
    pub fn render_files(&self, files: &[PathBuf]) -> Result<(Vec<RenderedChat>, Vec<FileReport>)> {
        let mut namer = MediaNamer::new();
        let mut chats = Vec::with_capacity(files.len());
        let mut reports = Vec::with_capacity(files.len());

        for file in files {
            info!(file = %file.display(), "Processing");
            let content =
                fs::read_to_string(file).map_err(|e| ChatportError::read_input(file, e))?;
            let (chat, report) = self.process_html(file, &content, &mut namer);
            chats.push(chat);
            reports.push(report);
        }
        info!(media = namer.total_issued(), "Named media attachments");
        Ok((chats, reports))
    }

    /// Converts `source` into an archive.
    pub fn convert(&self, source: &InputSource) -> Result<RunReport> {
        let files = source.input_files()?;
        let destination = self.archive_path(source)?;
        info!(files = files.len(), "Converting {}", source.base_dir().display());

        let (chats, files) = self.render_files(&files)?;
        let archive = self
            .archiver
            .build(&chats, &source.base_dir(), &destination)?;
        info!(
            media = archive.media_written,
            missing = archive.media_missing.len(),
            "ZIP file written to {}",
            archive.path.display()
        );

        Ok(RunReport { files, archive })
    }
}
