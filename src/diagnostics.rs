//! Logging of non-fatal conditions.
//!
//! Components never decide on their own how loud to be. Each one receives a
//! [`Diagnostics`] value when it is constructed and reports through it; the
//! value carries the [`DiagnosticsConfig`] that decides how much detail goes
//! into each event. Events are emitted with `tracing`, so the installed
//! subscriber decides where they end up.

use std::io;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::Message;
use crate::config::DiagnosticsConfig;
use crate::parsers::{ExtractIssue, Extraction, IssueKind};
use crate::parsing::truncate_fragment;

/// Logging capability handed to pipeline components.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    config: DiagnosticsConfig,
}

impl Diagnostics {
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Logs every issue of an extraction and a one-line summary.
    pub fn report_extraction(&self, file: &Path, extraction: &Extraction) {
        for issue in &extraction.issues {
            self.report_issue(file, issue);
        }
        let stats = &extraction.stats;
        info!(
            file = %file.display(),
            retained = stats.retained,
            dropped = stats.dropped,
            skipped = stats.skipped,
            attachments = stats.attachments,
            "Extracted {} of {} message elements",
            stats.retained,
            stats.elements
        );
    }

    /// Logs one extraction issue at the level its kind calls for.
    pub fn report_issue(&self, file: &Path, issue: &ExtractIssue) {
        let file = file.display();
        let index = issue.index;
        match &issue.kind {
            IssueKind::Structural { reason, fragment } => {
                if self.config.dump_fragments {
                    error!(
                        %file,
                        index,
                        "Failed to parse message #{index}: {reason}. Source data follows:\n{}",
                        truncate_fragment(fragment, self.config.fragment_limit)
                    );
                } else {
                    error!(%file, index, "Failed to parse message #{index}: {reason}");
                }
            }
            IssueKind::OrphanedSender => {
                warn!(%file, index, "Dropping message #{index}: no sender information");
            }
            IssueKind::OrphanedContinuation => {
                warn!(
                    %file,
                    index,
                    "Dropping message #{index}: continuation without a preceding message"
                );
            }
            IssueKind::MissingTimestamp => {
                warn!(%file, index, "Dropping message #{index}: no timestamp could be resolved");
            }
            IssueKind::ServiceEntry => {
                debug!(%file, index, "Skipping service entry #{index}");
            }
            IssueKind::UnclassifiableMedia {
                display_date,
                display_time,
                attributes,
            } => {
                warn!(
                    %file,
                    index,
                    "Detected unknown media type in message #{index} ({display_date} {display_time}): {attributes}"
                );
            }
            IssueKind::MissingHref { attributes } => {
                warn!(%file, index, "Attachment without href in message #{index}: {attributes}");
            }
            IssueKind::ForeignHref { href } => {
                warn!(
                    %file,
                    index,
                    "Ignoring attachment in message #{index}: '{href}' is outside the export directory"
                );
            }
        }
    }

    /// A message reached the formatter without a timestamp.
    pub fn unrenderable_message(&self, position: usize, message: &Message) {
        error!(
            position,
            sender = %message.sender,
            source_id = ?message.source_id,
            "Message has no time to render with, skipping"
        );
    }

    /// A media file could not be added to the archive.
    pub fn missing_media(&self, source: &Path, entry_name: &str, err: &io::Error) {
        warn!(
            source = %source.display(),
            entry = entry_name,
            "Could not read file {}, skipping {entry_name}: {err}",
            source.display()
        );
    }

    /// A media file was added to the archive.
    pub fn media_added(&self, source: &Path, entry_name: &str) {
        debug!("Adding {} as {entry_name}", source.display());
    }

    /// A media entry name was already written to the archive.
    pub fn duplicate_entry(&self, entry_name: &str) {
        debug!("Entry {entry_name} already in archive, skipping");
    }
}
